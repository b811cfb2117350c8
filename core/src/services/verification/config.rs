//! Configuration for the verification state machine.

/// Default number of digits in a generated OTP.
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// Default bytes of entropy behind a security code.
pub const DEFAULT_SECURITY_CODE_ENTROPY: usize = 16;

/// Default minutes before a stored code expires.
pub const DEFAULT_CODE_EXPIRY_MINUTES: u64 = 5;

/// Configuration for the verification state machine.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Digits in a generated OTP
    pub otp_length: usize,
    /// Bytes of CSPRNG entropy behind a security code
    pub security_code_entropy: usize,
    /// Minutes before a stored OTP or security code expires
    pub code_expiry_minutes: u64,
    /// Operational bypass codes accepted alongside (never instead of)
    /// a present stored OTP. Intended for automated testing and support.
    pub master_otp_codes: Vec<String>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            otp_length: DEFAULT_OTP_LENGTH,
            security_code_entropy: DEFAULT_SECURITY_CODE_ENTROPY,
            code_expiry_minutes: DEFAULT_CODE_EXPIRY_MINUTES,
            master_otp_codes: Vec::new(),
        }
    }
}

impl VerificationConfig {
    /// Store TTL for generated codes, in seconds.
    pub fn code_ttl_seconds(&self) -> u64 {
        self.code_expiry_minutes * 60
    }
}
