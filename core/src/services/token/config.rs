//! Configuration for the verification token codec.

use jsonwebtoken::Algorithm;

/// Configuration for the verification token codec.
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// Shared server secret used for signing and verification
    pub secret: String,
    /// Symmetric signing algorithm
    pub algorithm: Algorithm,
    /// Minutes until an issued token expires
    pub expiry_minutes: i64,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            expiry_minutes: 5,
        }
    }
}
