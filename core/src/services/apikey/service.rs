//! Long-lived API credential management for accounts.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::account::AccountView;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::account::{AccountFilter, AccountRepository};

/// Bytes of randomness behind a generated API key.
const API_KEY_BYTES: usize = 32;

/// Characters of the sanitized plaintext used as the self-derived salt.
const SALT_TAIL_LENGTH: usize = 21;

/// Fixed suffix appended to the self-derived salt.
const SALT_SUFFIX: &str = "e";

/// A freshly generated API key. The plaintext is handed out exactly
/// once; only its salted digest is ever persisted.
#[derive(Debug, Clone)]
pub struct GeneratedApiKey {
    pub plaintext: String,
    pub enabled: bool,
}

/// Generates, hashes, and toggles an account's long-lived API credential.
pub struct ApiKeyService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> ApiKeyService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Generate a fresh API key for the account, replacing any previous
    /// one and enabling it.
    ///
    /// The returned plaintext cannot be recovered afterward: the store
    /// keeps only the salted digest.
    pub async fn generate(&self, account_id: Uuid) -> DomainResult<GeneratedApiKey> {
        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;

        let plaintext = Self::generate_key();
        account.api_key_hash = Some(Self::hash_key(&plaintext));
        account.api_key_enabled = true;
        self.repository.update(account).await?;

        info!(account_id = %account_id, "api key rotated");
        Ok(GeneratedApiKey {
            plaintext,
            enabled: true,
        })
    }

    /// Resolve the account presenting this API key, by digest equality.
    pub async fn lookup_by_key(&self, plaintext: &str) -> DomainResult<AccountView> {
        let filter = AccountFilter::by_api_key_hash(Self::hash_key(plaintext));
        let account = self
            .repository
            .find_one(&filter)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;
        Ok(account.view())
    }

    /// Flip the key's enabled flag without regenerating it.
    pub async fn toggle(&self, account_id: Uuid) -> DomainResult<AccountView> {
        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;

        if account.api_key_hash.is_none() {
            return Err(DomainError::bad_request("apikey not available"));
        }

        account.api_key_enabled = !account.api_key_enabled;
        let updated = self.repository.update(account).await?;
        info!(
            account_id = %account_id,
            enabled = updated.api_key_enabled,
            "api key toggled"
        );
        Ok(updated.view())
    }

    /// 32 bytes of CSPRNG output, URL-safe encoded, with `-` and `_`
    /// stripped so the value doubles as an opaque username-like
    /// identifier elsewhere.
    fn generate_key() -> String {
        let mut bytes = [0u8; API_KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD
            .encode(bytes)
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect()
    }

    /// Salted SHA-256 digest of an API key, hex encoded.
    ///
    /// The salt is derived from the key itself (the tail of the
    /// sanitized plaintext plus a fixed suffix), so the digest can be
    /// recomputed from a presented key alone, allowing lookup without a
    /// per-record salt column. This trades randomized-salt strength for
    /// lookup-by-hash; the base secret carries 32 bytes of entropy.
    ///
    /// The tail is taken by characters, not bytes: lookups hash
    /// arbitrary caller input, which need not be ASCII.
    pub fn hash_key(plaintext: &str) -> String {
        let sanitized: String = plaintext
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        let skip = sanitized.chars().count().saturating_sub(SALT_TAIL_LENGTH);
        let tail: String = sanitized.chars().skip(skip).collect();
        let salt = format!("{tail}{SALT_SUFFIX}");

        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }
}
