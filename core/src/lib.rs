//! # VeriFlow Core
//!
//! Core business logic for account verification and credential recovery:
//! the OTP / security-code state machine, the verification token codec,
//! the API key manager, and the account orchestration service.
//!
//! External collaborators (ephemeral secret store, identity provider,
//! notification dispatcher, account store) are consumed through traits
//! defined in this crate and implemented in the infrastructure layer;
//! every trait ships with an in-memory mock for testing.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export the error spine for convenience
pub use errors::{DomainError, DomainResult, TokenError};
