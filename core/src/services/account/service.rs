//! Account lifecycle and credential orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use vf_shared::utils::validation::{is_valid_email, is_valid_phone};

use crate::domain::entities::account::{Account, AccountStatus, AccountView};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::account::{AccountFilter, AccountRepository};
use crate::services::verification::{
    NotificationChannel, NotificationDispatcher, SecretStore, VerificationService,
};

use super::traits::{IamTokenPair, IdentityProvider};

const PASSWORD_RESET_TEMPLATE: &str = "account_password_reset.html";

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Orchestrates account registration, login, and credential changes
/// against the repository, the verification state machine, and the IAM.
pub struct AccountService<R, S, N, I>
where
    R: AccountRepository,
    S: SecretStore,
    N: NotificationDispatcher,
    I: IdentityProvider,
{
    repository: Arc<R>,
    verification: Arc<VerificationService<R, S, N>>,
    iam: Arc<I>,
    notifier: Arc<N>,
}

impl<R, S, N, I> AccountService<R, S, N, I>
where
    R: AccountRepository,
    S: SecretStore,
    N: NotificationDispatcher,
    I: IdentityProvider,
{
    pub fn new(
        repository: Arc<R>,
        verification: Arc<VerificationService<R, S, N>>,
        iam: Arc<I>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            repository,
            verification,
            iam,
            notifier,
        }
    }

    /// Register a new account: persist it inactive, mirror it into the
    /// IAM (username = account id), then kick off phone OTP and email
    /// link verification.
    pub async fn register(
        &self,
        new_account: NewAccount,
        verification_base_url: &str,
    ) -> DomainResult<AccountView> {
        if !is_valid_phone(&new_account.phone) {
            return Err(DomainError::validation("invalid phone number"));
        }
        if !is_valid_email(&new_account.email) {
            return Err(DomainError::validation("invalid email address"));
        }
        check_password_shape(&new_account.password)?;

        let mut account = Account::new(
            new_account.username,
            new_account.phone,
            new_account.email,
        );
        account.secret_hash = Some(hash_password(&new_account.password)?);
        let account = self.repository.create(account).await?;

        let provider_id = self
            .iam
            .create_user(
                &account.id.to_string(),
                &new_account.password,
                &account.email,
            )
            .await
            .map_err(|e| DomainError::internal(format!("failed to create iam user: {e}")))?;

        let mut linked = account;
        linked.iam_provider_id = Some(provider_id);
        let linked = self.repository.update(linked).await?;

        self.verification.send_otp(Some(&linked.phone), None).await?;
        self.verification
            .send_verification_link(linked.id, verification_base_url)
            .await?;

        info!(account_id = %linked.id, "account registered");
        Ok(linked.view())
    }

    /// Authenticate and return an IAM token pair.
    ///
    /// Accounts predating the IAM mirror are linked lazily on their
    /// first successful login.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<IamTokenPair> {
        let account = self
            .repository
            .find_one(&AccountFilter::by_username(username))
            .await?
            .ok_or_else(|| DomainError::bad_request("username or password invalid"))?;

        if account.status == AccountStatus::Deactivated {
            return Err(DomainError::bad_request("username or password invalid"));
        }
        self.check_secret(&account, password)?;
        let account = self.ensure_iam_linked(account, password).await?;

        let tokens = self
            .iam
            .issue_token(&account.id.to_string(), password)
            .await
            .map_err(|e| DomainError::internal(format!("failed to issue iam token: {e}")))?;

        let mut stamped = account;
        stamped.last_login = Some(Utc::now());
        self.repository.update(stamped).await?;

        Ok(tokens)
    }

    /// The verification state machine this service drives.
    ///
    /// Exposed so callers can run the confirm/redeem steps directly
    /// between requesting a reset and completing it.
    pub fn verification(&self) -> &VerificationService<R, S, N> {
        &self.verification
    }

    /// Exchange a refresh token for a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<IamTokenPair> {
        self.iam
            .refresh_token(refresh_token)
            .await
            .map_err(|e| DomainError::internal(format!("failed to refresh iam token: {e}")))
    }

    /// Start credential recovery by sending an OTP to exactly one of
    /// the account's channels.
    pub async fn request_password_reset(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> DomainResult<AccountView> {
        self.verification.send_otp(phone, email).await
    }

    /// Finish credential recovery: redeem the security code, overwrite
    /// the local secret hash, propagate to the IAM, and notify the user.
    ///
    /// Redemption happens first and consumes the code, so repeating the
    /// same call fails as a bad request.
    pub async fn reset_password(
        &self,
        account_id: Uuid,
        security_code: &str,
        new_password: &str,
    ) -> DomainResult<AccountView> {
        check_password_shape(new_password)?;
        self.verification
            .redeem_security_code(account_id, security_code)
            .await?;

        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;

        account.secret_hash = Some(hash_password(new_password)?);
        let updated = self.repository.update(account).await?;

        let provider_id = updated.iam_provider_id.clone().ok_or_else(|| {
            DomainError::internal("account has no identity provider linkage")
        })?;
        self.iam
            .change_password(&provider_id, new_password)
            .await
            .map_err(|e| DomainError::internal(format!("failed to change iam password: {e}")))?;

        let metadata = HashMap::from([
            ("user_id".to_string(), updated.id.to_string()),
            ("email".to_string(), updated.email.clone()),
            ("subject".to_string(), "Reset Account Password".to_string()),
        ]);
        self.notifier
            .send(
                NotificationChannel::Email,
                &updated.email,
                PASSWORD_RESET_TEMPLATE,
                metadata,
            )
            .await
            .map_err(|e| DomainError::internal(format!("failed to dispatch notification: {e}")))?;

        info!(account_id = %account_id, "password reset completed");
        Ok(updated.view())
    }

    /// Change the password of an authenticated account and re-issue
    /// tokens under the new secret.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<IamTokenPair> {
        check_password_shape(new_password)?;
        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;

        self.check_secret(&account, old_password)?;

        let mut updated = account;
        updated.secret_hash = Some(hash_password(new_password)?);
        let updated = self.repository.update(updated).await?;

        let provider_id = updated.iam_provider_id.clone().ok_or_else(|| {
            DomainError::internal("account has no identity provider linkage")
        })?;
        self.iam
            .change_password(&provider_id, new_password)
            .await
            .map_err(|e| DomainError::internal(format!("failed to change iam password: {e}")))?;

        self.iam
            .issue_token(&updated.id.to_string(), new_password)
            .await
            .map_err(|e| DomainError::internal(format!("failed to issue iam token: {e}")))
    }

    /// Deactivate the account. Deactivated accounts keep their record
    /// but can no longer log in; reversal is an operator action, not a
    /// self-service flow.
    pub async fn deactivate(&self, account_id: Uuid) -> DomainResult<AccountView> {
        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;

        account.status = AccountStatus::Deactivated;
        let updated = self.repository.update(account).await?;

        info!(account_id = %account_id, "account deactivated");
        Ok(updated.view())
    }

    fn check_secret(&self, account: &Account, password: &str) -> DomainResult<()> {
        let hash = account
            .secret_hash
            .as_deref()
            .ok_or_else(|| DomainError::bad_request("username or password invalid"))?;
        let valid = bcrypt::verify(password, hash)
            .map_err(|e| DomainError::internal(format!("failed to verify password: {e}")))?;
        if !valid {
            return Err(DomainError::bad_request("username or password invalid"));
        }
        Ok(())
    }

    async fn ensure_iam_linked(&self, account: Account, password: &str) -> DomainResult<Account> {
        if account.iam_provider_id.is_some() {
            return Ok(account);
        }
        let provider_id = self
            .iam
            .create_user(&account.id.to_string(), password, &account.email)
            .await
            .map_err(|e| DomainError::internal(format!("failed to create iam user: {e}")))?;

        let mut linked = account;
        linked.iam_provider_id = Some(provider_id);
        self.repository.update(linked).await
    }
}

fn check_password_shape(password: &str) -> DomainResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::validation("password too short"));
    }
    Ok(())
}

fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| DomainError::internal(format!("failed to hash password: {e}")))
}
