use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;
use crate::repositories::account::{AccountRepository, MockAccountRepository};
use crate::services::apikey::ApiKeyService;

async fn service_with_account() -> (ApiKeyService<MockAccountRepository>, Account) {
    let repository = Arc::new(MockAccountRepository::new());
    let account = repository
        .create(Account::new("jdoe", "1234556789", "jdoe@example.com"))
        .await
        .unwrap();
    (ApiKeyService::new(repository), account)
}

#[tokio::test]
async fn generate_returns_plaintext_once_and_persists_only_the_digest() {
    let (service, account) = service_with_account().await;

    let generated = service.generate(account.id).await.unwrap();
    assert!(generated.enabled);
    assert!(!generated.plaintext.is_empty());
    assert!(!generated.plaintext.contains('-'));
    assert!(!generated.plaintext.contains('_'));

    let stored = service.lookup_by_key(&generated.plaintext).await.unwrap();
    assert_eq!(stored.id, account.id);
    assert!(stored.api_key_enabled);
}

#[tokio::test]
async fn lookup_with_any_other_string_is_not_found() {
    let (service, account) = service_with_account().await;
    service.generate(account.id).await.unwrap();

    let err = service.lookup_by_key("some-other-key").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn regenerating_invalidates_the_previous_key() {
    let (service, account) = service_with_account().await;

    let first = service.generate(account.id).await.unwrap();
    let second = service.generate(account.id).await.unwrap();
    assert_ne!(first.plaintext, second.plaintext);

    assert!(service.lookup_by_key(&first.plaintext).await.is_err());
    assert!(service.lookup_by_key(&second.plaintext).await.is_ok());
}

#[tokio::test]
async fn toggle_without_a_generated_key_is_a_bad_request() {
    let (service, account) = service_with_account().await;

    let err = service.toggle(account.id).await.unwrap_err();
    assert!(matches!(err, DomainError::BadRequest { .. }));
}

#[tokio::test]
async fn toggle_flips_the_enabled_flag_without_rotating() {
    let (service, account) = service_with_account().await;
    let generated = service.generate(account.id).await.unwrap();

    let disabled = service.toggle(account.id).await.unwrap();
    assert!(!disabled.api_key_enabled);

    let enabled = service.toggle(account.id).await.unwrap();
    assert!(enabled.api_key_enabled);

    // The key itself survived both toggles.
    assert!(service.lookup_by_key(&generated.plaintext).await.is_ok());
}

#[tokio::test]
async fn generate_for_unknown_account_is_not_found() {
    let (service, _) = service_with_account().await;
    let err = service.generate(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[test]
fn hash_is_deterministic_and_key_dependent() {
    let a = ApiKeyService::<MockAccountRepository>::hash_key("alphabetagamma1234567890");
    let b = ApiKeyService::<MockAccountRepository>::hash_key("alphabetagamma1234567890");
    let c = ApiKeyService::<MockAccountRepository>::hash_key("differentkey0987654321xy");

    assert_eq!(a, b);
    assert_ne!(a, c);
    // SHA-256 hex digest
    assert_eq!(a.len(), 64);
}

#[tokio::test]
async fn lookup_with_a_multibyte_key_is_not_found() {
    let (service, account) = service_with_account().await;
    service.generate(account.id).await.unwrap();

    // Presented keys are arbitrary caller input; non-ASCII must miss
    // cleanly, not panic on a salt-tail boundary.
    let err = service.lookup_by_key(&"é".repeat(23)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[test]
fn hash_handles_multibyte_inputs() {
    let digest = ApiKeyService::<MockAccountRepository>::hash_key(&"é".repeat(23));
    assert_eq!(digest.len(), 64);
}

#[test]
fn hash_handles_short_inputs() {
    // Shorter than the salt tail; must not panic.
    let digest = ApiKeyService::<MockAccountRepository>::hash_key("tiny");
    assert_eq!(digest.len(), 64);
}
