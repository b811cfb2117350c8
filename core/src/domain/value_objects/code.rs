//! Short-lived codes held in the ephemeral secret store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of short-lived code, determining its store key.
///
/// Keys are namespaced per account, so there is no cross-account
/// interference. Both delivery channels share the single OTP slot:
/// requesting a code for phone and email concurrently overwrites the
/// earlier one. Known limitation, reproduced as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Six-digit one-time password proving channel possession
    Otp,
    /// High-entropy code gating one sensitive follow-up action
    SecurityCode,
}

impl CodeKind {
    /// Store key for this code kind, scoped to one account.
    pub fn store_key(&self, account_id: Uuid) -> String {
        match self {
            CodeKind::Otp => format!("{account_id}_otp_code"),
            CodeKind::SecurityCode => format!("{account_id}_sec_code"),
        }
    }
}

/// Outcome of a successful OTP confirmation: the security code gating
/// the follow-up sensitive operation (password reset, phone verify).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpConfirmation {
    pub account_id: Uuid,
    pub security_code: String,
}
