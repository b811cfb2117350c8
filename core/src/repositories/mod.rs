//! Repository interfaces for persistent collaborators.

pub mod account;

pub use account::{AccountFilter, AccountRepository, MockAccountRepository};
