//! End-to-end flows exercised through the crate's public surface,
//! with in-memory collaborators standing in for Redis, Keycloak, and
//! the notification service.

use std::sync::Arc;

use vf_core::repositories::account::{AccountRepository, MockAccountRepository};
use vf_core::services::account::{AccountService, MockIdentityProvider, NewAccount};
use vf_core::services::apikey::ApiKeyService;
use vf_core::services::token::{TokenCodecConfig, VerificationTokenCodec};
use vf_core::services::verification::{
    MockNotificationDispatcher, MockSecretStore, VerificationConfig, VerificationService,
};
use vf_core::DomainError;

struct World {
    repository: Arc<MockAccountRepository>,
    notifier: Arc<MockNotificationDispatcher>,
    iam: Arc<MockIdentityProvider>,
    accounts: AccountService<
        MockAccountRepository,
        MockSecretStore,
        MockNotificationDispatcher,
        MockIdentityProvider,
    >,
    api_keys: ApiKeyService<MockAccountRepository>,
}

fn world() -> World {
    let repository = Arc::new(MockAccountRepository::new());
    let store = Arc::new(MockSecretStore::new());
    let notifier = Arc::new(MockNotificationDispatcher::new());
    let iam = Arc::new(MockIdentityProvider::new());
    let tokens = Arc::new(VerificationTokenCodec::new(TokenCodecConfig::default()));

    let verification = Arc::new(VerificationService::new(
        repository.clone(),
        store,
        notifier.clone(),
        tokens,
        VerificationConfig::default(),
    ));
    let accounts = AccountService::new(
        repository.clone(),
        verification,
        iam.clone(),
        notifier.clone(),
    );
    let api_keys = ApiKeyService::new(repository.clone());

    World {
        repository,
        notifier,
        iam,
        accounts,
        api_keys,
    }
}

fn signup() -> NewAccount {
    NewAccount {
        username: "jdoe".to_string(),
        phone: "1234556789".to_string(),
        email: "jdoe@example.com".to_string(),
        password: "original password".to_string(),
    }
}

#[tokio::test]
async fn lost_credential_recovery_end_to_end() {
    let w = world();
    let view = w
        .accounts
        .register(signup(), "https://app.example.com/verify-email")
        .await
        .unwrap();

    // The user "lost" their password; recovery starts over SMS.
    w.accounts
        .request_password_reset(None, Some("1234556789"))
        .await
        .unwrap();
    let otp = w
        .notifier
        .last_metadata_value("1234556789", "otp")
        .expect("otp should have been dispatched out-of-band");

    // Trade the OTP for a single-use security code, then redeem it.
    let confirmation = w
        .accounts
        .verification()
        .confirm_otp(view.id, &otp)
        .await
        .unwrap();
    w.accounts
        .reset_password(view.id, &confirmation.security_code, "recovered password")
        .await
        .unwrap();

    // The change propagated both locally and into the IAM.
    assert!(w.accounts.login("jdoe", "original password").await.is_err());
    let tokens = w.accounts.login("jdoe", "recovered password").await.unwrap();
    assert!(!tokens.access_token.is_empty());
    assert_eq!(w.iam.password_changes().len(), 1);

    // Replay of the consumed security code is dead.
    let err = w
        .accounts
        .reset_password(view.id, &confirmation.security_code, "third password")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BadRequest { .. }));

    // Replay of the consumed OTP is dead too.
    let err = w
        .accounts
        .verification()
        .confirm_otp(view.id, &otp)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BadRequest { .. }));
}

#[tokio::test]
async fn phone_verification_end_to_end() {
    let w = world();
    let view = w
        .accounts
        .register(signup(), "https://app.example.com/verify-email")
        .await
        .unwrap();
    assert!(!view.is_phone_verified);

    // Registration already dispatched the OTP to the phone.
    let otp = w.notifier.last_metadata_value("1234556789", "otp").unwrap();
    let verified = w
        .accounts
        .verification()
        .verify_phone(view.id, &otp)
        .await
        .unwrap();
    assert!(verified.is_phone_verified);
}

#[tokio::test]
async fn email_verification_link_end_to_end() {
    let w = world();
    let base_url = "https://app.example.com/verify-email";
    let view = w.accounts.register(signup(), base_url).await.unwrap();

    let link = w
        .notifier
        .last_metadata_value("jdoe@example.com", "verification_link")
        .expect("verification link should have been dispatched");
    let token = link
        .strip_prefix(&format!("{base_url}?token="))
        .expect("link should carry the token as a query parameter");

    let verified = w
        .accounts
        .verification()
        .complete_email_verification(token)
        .await
        .unwrap()
        .expect("a live token should verify");
    assert_eq!(verified.id, view.id);
    assert!(verified.is_email_verified);

    // A mangled token is reported as "nothing verified", not an error.
    let outcome = w
        .accounts
        .verification()
        .complete_email_verification("not-a-token")
        .await
        .unwrap();
    assert!(outcome.is_none());

    // Re-requesting a link for a verified email is refused.
    let err = w
        .accounts
        .verification()
        .send_verification_link(view.id, base_url)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BadRequest { .. }));
}

#[tokio::test]
async fn api_key_lifecycle() {
    let w = world();
    let view = w
        .accounts
        .register(signup(), "https://app.example.com/verify-email")
        .await
        .unwrap();

    // No key yet, so there is nothing to toggle.
    let err = w.api_keys.toggle(view.id).await.unwrap_err();
    assert!(matches!(err, DomainError::BadRequest { .. }));

    let generated = w.api_keys.generate(view.id).await.unwrap();
    let holder = w.api_keys.lookup_by_key(&generated.plaintext).await.unwrap();
    assert_eq!(holder.id, view.id);

    // Only the digest is persisted.
    let stored = w.repository.find_by_id(view.id).await.unwrap().unwrap();
    assert_ne!(stored.api_key_hash.as_deref(), Some(generated.plaintext.as_str()));

    let disabled = w.api_keys.toggle(view.id).await.unwrap();
    assert!(!disabled.api_key_enabled);
}
