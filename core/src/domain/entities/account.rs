//! Account entity: the subject of every verification flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Inactive,
    Active,
    Disabled,
    Blocked,
    Deactivated,
}

/// A user account.
///
/// Credentials are only ever held hashed: `secret_hash` is a bcrypt
/// digest and `api_key_hash` a salted SHA-256 digest. The raw values
/// never touch persistent state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Opaque unique identifier; the subject of all issued tokens
    pub id: Uuid,
    pub username: String,
    pub phone: String,
    pub email: String,
    /// bcrypt hash of the account password
    pub secret_hash: Option<String>,
    /// Identifier of the mirrored user inside the external IAM
    pub iam_provider_id: Option<String>,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    /// Salted digest of the API key; the plaintext is never retained
    pub api_key_hash: Option<String>,
    pub api_key_enabled: bool,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a fresh, unverified account pending activation.
    pub fn new(
        username: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            phone: phone.into(),
            email: email.into(),
            secret_hash: None,
            iam_provider_id: None,
            is_email_verified: false,
            is_phone_verified: false,
            api_key_hash: None,
            api_key_enabled: false,
            status: AccountStatus::Inactive,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    /// Caller-visible projection of this account.
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            username: self.username.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            is_email_verified: self.is_email_verified,
            is_phone_verified: self.is_phone_verified,
            api_key_enabled: self.api_key_enabled,
            status: self.status,
        }
    }
}

/// Public view of an account, safe to hand to callers.
///
/// Hashes and IAM linkage are deliberately absent; one-time codes are
/// only ever delivered out-of-band, never through this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: Uuid,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    pub api_key_enabled: bool,
    pub status: AccountStatus,
}
