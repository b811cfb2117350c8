//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::trait_::{AccountFilter, AccountRepository};

/// In-memory account repository for testing.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn matches(account: &Account, filter: &AccountFilter) -> bool {
        if filter.is_empty() {
            return false;
        }
        if let Some(username) = &filter.username {
            if &account.username != username {
                return false;
            }
        }
        if let Some(phone) = &filter.phone {
            if &account.phone != phone {
                return false;
            }
        }
        if let Some(email) = &filter.email {
            if &account.email != email {
                return false;
            }
        }
        if let Some(hash) = &filter.api_key_hash {
            if account.api_key_hash.as_deref() != Some(hash.as_str()) {
                return false;
            }
        }
        true
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_one(&self, filter: &AccountFilter) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| Self::matches(account, filter))
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|existing| existing.phone == account.phone || existing.email == account.email)
        {
            return Err(DomainError::bad_request("account already exists"));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::not_found("account"));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}
