//! Verification token codec for email-link verification.
//!
//! Tokens are compact, self-contained, and time-bounded: a signed
//! `{subject, expiry}` pair with no server-side state. Validity is
//! entirely a function of signature and expiry.

mod config;
mod service;


pub use config::TokenCodecConfig;
pub use service::VerificationTokenCodec;
