//! Verification service: the OTP / security-code state machine.
//!
//! The two-phase "verify then act" protocol lives here:
//! - request an OTP for a channel (`send_otp`), delivered out-of-band;
//! - confirm it (`confirm_otp`), trading the single-use OTP for a
//!   higher-entropy single-use security code;
//! - redeem the security code exactly once from a sensitive operation
//!   (`verify_phone`, password reset).
//!
//! Email-link verification (`send_verification_link`,
//! `complete_email_verification`) rides on the stateless token codec
//! instead of the store.

mod config;
mod generator;
mod service;
mod traits;

pub mod mock;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use generator::{generate_otp, generate_security_code};
pub use mock::{MockNotificationDispatcher, MockSecretStore, SentNotification};
pub use service::VerificationService;
pub use traits::{NotificationChannel, NotificationDispatcher, SecretStore};
