//! Configuration structures for the VeriFlow backend.
//!
//! Each collaborator gets a plain config struct with sensible defaults and
//! an environment loader; the infrastructure crate wires them together.

pub mod cache;
pub mod iam;
pub mod notifier;

pub use cache::CacheConfig;
pub use iam::IamConfig;
pub use notifier::NotifierConfig;
