//! The OTP / security-code state machine.

use std::collections::HashMap;
use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use tracing::{debug, info};
use uuid::Uuid;

use vf_shared::utils::validation::{is_valid_email, is_valid_phone};

use crate::domain::entities::account::AccountView;
use crate::domain::value_objects::code::{CodeKind, OtpConfirmation};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::account::{AccountFilter, AccountRepository};
use crate::services::token::VerificationTokenCodec;

use super::config::VerificationConfig;
use super::generator::{generate_otp, generate_security_code};
use super::traits::{NotificationChannel, NotificationDispatcher, SecretStore};

const OTP_SMS_TEMPLATE: &str = "account_otp_code.txt";
const OTP_EMAIL_TEMPLATE: &str = "account_otp_code.html";
const EMAIL_VERIFICATION_TEMPLATE: &str = "email_verification.html";

/// Orchestrates code generator, secret store, token codec, and notifier
/// into the two-phase "verify then act" protocol.
///
/// State per (account, code kind) lives entirely in the secret store;
/// each transition is a single round trip with no suspension beyond
/// network latency. Single-use semantics come from consuming a key via
/// check-and-remove on success, never on failure.
pub struct VerificationService<R, S, N>
where
    R: AccountRepository,
    S: SecretStore,
    N: NotificationDispatcher,
{
    repository: Arc<R>,
    store: Arc<S>,
    notifier: Arc<N>,
    tokens: Arc<VerificationTokenCodec>,
    config: VerificationConfig,
}

impl<R, S, N> VerificationService<R, S, N>
where
    R: AccountRepository,
    S: SecretStore,
    N: NotificationDispatcher,
{
    pub fn new(
        repository: Arc<R>,
        store: Arc<S>,
        notifier: Arc<N>,
        tokens: Arc<VerificationTokenCodec>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            repository,
            store,
            notifier,
            tokens,
            config,
        }
    }

    /// Idle → OTP-Pending: generate an OTP for exactly one channel,
    /// store it under the account's OTP key, and dispatch it out-of-band.
    ///
    /// The returned view never exposes the code. Both channels share one
    /// OTP slot per account, so a new request overwrites a pending one.
    pub async fn send_otp(
        &self,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> DomainResult<AccountView> {
        let (filter, channel) = match (phone, email) {
            (Some(phone), None) => {
                if !is_valid_phone(phone) {
                    return Err(DomainError::validation("invalid phone number"));
                }
                (AccountFilter::by_phone(phone), NotificationChannel::Sms)
            }
            (None, Some(email)) => {
                if !is_valid_email(email) {
                    return Err(DomainError::validation("invalid email address"));
                }
                (AccountFilter::by_email(email), NotificationChannel::Email)
            }
            _ => return Err(DomainError::bad_request("invalid otp channel")),
        };

        let account = self
            .repository
            .find_one(&filter)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;

        let otp_code = generate_otp(self.config.otp_length);
        self.store
            .set(
                &CodeKind::Otp.store_key(account.id),
                &otp_code,
                self.config.code_ttl_seconds(),
            )
            .await
            .map_err(|e| DomainError::internal(format!("failed to store otp code: {e}")))?;

        match channel {
            NotificationChannel::Sms => {
                let metadata = HashMap::from([
                    ("user_id".to_string(), account.id.to_string()),
                    ("otp".to_string(), otp_code),
                ]);
                self.dispatch(channel, &account.phone, OTP_SMS_TEMPLATE, metadata)
                    .await?;
            }
            NotificationChannel::Email => {
                let metadata = HashMap::from([
                    ("account_id".to_string(), account.id.to_string()),
                    ("email".to_string(), account.email.clone()),
                    ("otp".to_string(), otp_code),
                    (
                        "subject".to_string(),
                        "One-Time Password (OTP) Verification".to_string(),
                    ),
                ]);
                self.dispatch(channel, &account.email, OTP_EMAIL_TEMPLATE, metadata)
                    .await?;
            }
        }

        info!(account_id = %account.id, channel = channel.as_str(), "otp issued");
        Ok(account.view())
    }

    /// OTP-Pending → SecCode-Issued: validate a submitted OTP and trade
    /// it for the security code gating the follow-up action.
    ///
    /// The submission is accepted when it matches the stored code or the
    /// configured master override list. The list is checked in addition
    /// to a present stored code, never instead of one: with no live OTP
    /// the request fails as expired regardless. On success the OTP is
    /// consumed; the security code is created idempotently, so a second
    /// confirmation inside the same open window returns the same code.
    pub async fn confirm_otp(
        &self,
        account_id: Uuid,
        submitted_code: &str,
    ) -> DomainResult<OtpConfirmation> {
        let otp_key = CodeKind::Otp.store_key(account_id);
        let stored = self
            .store
            .get(&otp_key)
            .await
            .map_err(|e| DomainError::internal(format!("failed to read otp code: {e}")))?
            .ok_or_else(|| DomainError::bad_request("otp code has expired"))?;

        let matches = constant_time_eq(submitted_code.as_bytes(), stored.as_bytes())
            || self
                .config
                .master_otp_codes
                .iter()
                .any(|master| master == submitted_code);
        if !matches {
            return Err(DomainError::bad_request("invalid otp code"));
        }

        let security_code = self.issue_security_code(account_id).await?;

        // Consume the OTP only now that the transition is committed; a
        // failed confirm leaves the key untouched.
        self.store
            .delete_if_eq(&otp_key, &stored)
            .await
            .map_err(|e| DomainError::internal(format!("failed to consume otp code: {e}")))?;

        info!(account_id = %account_id, "otp confirmed, security code issued");
        Ok(OtpConfirmation {
            account_id,
            security_code,
        })
    }

    /// SecCode-Issued → Redeemed: consume the security code exactly once
    /// and return the validated value.
    ///
    /// Invoked by the sensitive operations (phone verification finalize,
    /// password reset). A failed redemption leaves the key untouched.
    pub async fn redeem_security_code(
        &self,
        account_id: Uuid,
        submitted_code: &str,
    ) -> DomainResult<String> {
        let sec_key = CodeKind::SecurityCode.store_key(account_id);
        let stored = self
            .store
            .get(&sec_key)
            .await
            .map_err(|e| DomainError::internal(format!("failed to read security code: {e}")))?
            .ok_or_else(|| DomainError::bad_request("security code has expired"))?;

        if !constant_time_eq(submitted_code.as_bytes(), stored.as_bytes()) {
            return Err(DomainError::bad_request("security code is invalid"));
        }

        self.store
            .delete_if_eq(&sec_key, &stored)
            .await
            .map_err(|e| DomainError::internal(format!("failed to consume security code: {e}")))?;

        info!(account_id = %account_id, "security code redeemed");
        Ok(stored)
    }

    /// Finalize phone verification: confirm the OTP, immediately redeem
    /// the resulting security code, and mark the phone verified.
    pub async fn verify_phone(&self, account_id: Uuid, otp_code: &str) -> DomainResult<AccountView> {
        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;

        let confirmation = self.confirm_otp(account.id, otp_code).await?;
        self.redeem_security_code(confirmation.account_id, &confirmation.security_code)
            .await?;

        account.is_phone_verified = true;
        let updated = self.repository.update(account).await?;
        info!(account_id = %account_id, "phone verified");
        Ok(updated.view())
    }

    /// Issue a signed verification token and email it as a link.
    ///
    /// Fails as a bad request when the email is already verified; the
    /// token itself has no revocation, so this state check is what keeps
    /// moot links from being re-issued.
    pub async fn send_verification_link(
        &self,
        account_id: Uuid,
        base_url: &str,
    ) -> DomainResult<AccountView> {
        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("account"))?;

        if account.is_email_verified {
            return Err(DomainError::bad_request("email already verified"));
        }

        let token = self.tokens.issue(account.id)?;
        let metadata = HashMap::from([
            ("user_id".to_string(), account.id.to_string()),
            ("email".to_string(), account.email.clone()),
            (
                "verification_link".to_string(),
                format!("{base_url}?token={token}"),
            ),
            ("subject".to_string(), "Verify Account Email".to_string()),
        ]);
        self.dispatch(
            NotificationChannel::Email,
            &account.email,
            EMAIL_VERIFICATION_TEMPLATE,
            metadata,
        )
        .await?;

        info!(account_id = %account.id, "verification link sent");
        Ok(account.view())
    }

    /// Complete email verification from a link token.
    ///
    /// Returns `None` when the token is invalid or expired, or when its
    /// subject no longer resolves. Marking the email verified is
    /// idempotent, so replaying a still-live token is harmless.
    pub async fn complete_email_verification(
        &self,
        token: &str,
    ) -> DomainResult<Option<AccountView>> {
        let subject_id = match self.tokens.verify(token) {
            Ok(id) => id,
            Err(err) => {
                debug!(error = %err, "email verification token rejected");
                return Ok(None);
            }
        };

        let Some(mut account) = self.repository.find_by_id(subject_id).await? else {
            return Ok(None);
        };

        account.is_email_verified = true;
        let updated = self.repository.update(account).await?;
        info!(account_id = %subject_id, "email verified");
        Ok(Some(updated.view()))
    }

    /// Get-or-create the account's security code.
    ///
    /// Idempotent per open window: an existing unexpired code is
    /// returned rather than replaced, so a code already shown to the
    /// user is never invalidated by a second confirmation.
    async fn issue_security_code(&self, account_id: Uuid) -> DomainResult<String> {
        let sec_key = CodeKind::SecurityCode.store_key(account_id);
        let existing = self
            .store
            .get(&sec_key)
            .await
            .map_err(|e| DomainError::internal(format!("failed to read security code: {e}")))?;
        if let Some(code) = existing {
            return Ok(code);
        }

        let code = generate_security_code(self.config.security_code_entropy);
        self.store
            .set(&sec_key, &code, self.config.code_ttl_seconds())
            .await
            .map_err(|e| DomainError::internal(format!("failed to store security code: {e}")))?;
        Ok(code)
    }

    async fn dispatch(
        &self,
        channel: NotificationChannel,
        recipient: &str,
        template_name: &str,
        metadata: HashMap<String, String>,
    ) -> DomainResult<()> {
        self.notifier
            .send(channel, recipient, template_name, metadata)
            .await
            .map_err(|e| DomainError::internal(format!("failed to dispatch notification: {e}")))
    }
}
