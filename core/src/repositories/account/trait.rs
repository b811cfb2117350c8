//! Account repository trait defining the interface to the account store.
//!
//! The storage engine behind this trait is an external collaborator; the
//! core only consumes this contract. Implementations live in the
//! infrastructure layer, and a `MockAccountRepository` ships alongside
//! for tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Lookup filter for accounts; every populated field must match.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub username: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub api_key_hash: Option<String>,
}

impl AccountFilter {
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn by_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn by_api_key_hash(hash: impl Into<String>) -> Self {
        Self {
            api_key_hash: Some(hash.into()),
            ..Default::default()
        }
    }

    /// True when no field is populated; such a filter matches nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.api_key_hash.is_none()
    }
}

/// Repository contract for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find the account matching every populated filter field.
    /// An empty filter matches nothing.
    async fn find_one(&self, filter: &AccountFilter) -> Result<Option<Account>, DomainError>;

    /// Persist a new account.
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist changes to an existing account.
    async fn update(&self, account: Account) -> Result<Account, DomainError>;
}
