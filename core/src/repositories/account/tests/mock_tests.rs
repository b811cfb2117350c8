use crate::domain::entities::account::Account;
use crate::repositories::account::{AccountFilter, AccountRepository, MockAccountRepository};

fn sample_account() -> Account {
    Account::new("jdoe", "1234556789", "jdoe@example.com")
}

#[tokio::test]
async fn create_then_find_by_id() {
    let repo = MockAccountRepository::new();
    let account = repo.create(sample_account()).await.unwrap();

    let found = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(found.username, "jdoe");
}

#[tokio::test]
async fn create_rejects_duplicate_phone_or_email() {
    let repo = MockAccountRepository::new();
    repo.create(sample_account()).await.unwrap();

    let duplicate = Account::new("other", "1234556789", "other@example.com");
    assert!(repo.create(duplicate).await.is_err());
}

#[tokio::test]
async fn find_one_matches_each_filter_field() {
    let repo = MockAccountRepository::new();
    let mut account = sample_account();
    account.api_key_hash = Some("digest".into());
    repo.create(account.clone()).await.unwrap();

    for filter in [
        AccountFilter::by_username("jdoe"),
        AccountFilter::by_phone("1234556789"),
        AccountFilter::by_email("jdoe@example.com"),
        AccountFilter::by_api_key_hash("digest"),
    ] {
        let found = repo.find_one(&filter).await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(account.id));
    }
}

#[tokio::test]
async fn empty_filter_matches_nothing() {
    let repo = MockAccountRepository::new();
    repo.create(sample_account()).await.unwrap();

    let found = repo.find_one(&AccountFilter::default()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn update_requires_existing_account() {
    let repo = MockAccountRepository::new();
    let account = repo.create(sample_account()).await.unwrap();

    let mut updated = account.clone();
    updated.is_phone_verified = true;
    let stored = repo.update(updated).await.unwrap();
    assert!(stored.is_phone_verified);

    let unknown = Account::new("ghost", "9999999999", "g@example.com");
    assert!(repo.update(unknown).await.is_err());
}
