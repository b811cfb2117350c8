use crate::domain::entities::account::{Account, AccountStatus};

#[test]
fn new_accounts_start_inactive_and_unverified() {
    let account = Account::new("jdoe", "1234556789", "jdoe@example.com");

    assert_eq!(account.status, AccountStatus::Inactive);
    assert!(!account.is_email_verified);
    assert!(!account.is_phone_verified);
    assert!(account.secret_hash.is_none());
    assert!(account.iam_provider_id.is_none());
    assert!(account.api_key_hash.is_none());
    assert!(!account.api_key_enabled);
    assert!(account.last_login.is_none());
}

#[test]
fn distinct_accounts_get_distinct_ids() {
    let a = Account::new("a", "1111111111", "a@example.com");
    let b = Account::new("b", "2222222222", "b@example.com");
    assert_ne!(a.id, b.id);
}

#[test]
fn view_mirrors_public_fields_only() {
    let mut account = Account::new("jdoe", "1234556789", "jdoe@example.com");
    account.secret_hash = Some("$2b$12$secret".into());
    account.api_key_hash = Some("digest".into());
    account.api_key_enabled = true;

    let view = account.view();
    assert_eq!(view.id, account.id);
    assert_eq!(view.username, "jdoe");
    assert_eq!(view.phone, "1234556789");
    assert_eq!(view.email, "jdoe@example.com");
    assert!(view.api_key_enabled);
    // The view type has no hash fields; nothing sensitive to assert on.
}
