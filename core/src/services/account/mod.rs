//! Account orchestration: registration, login, and credential changes.
//!
//! Ties the repository, the verification state machine, the external
//! identity provider, and the notifier together. The IAM remains the
//! system of record for authentication credentials; this service keeps
//! the local account and the IAM mirror in step.

mod service;
mod traits;

pub mod mock;


pub use mock::MockIdentityProvider;
pub use service::{AccountService, NewAccount};
pub use traits::{IamTokenPair, IdentityProvider};
