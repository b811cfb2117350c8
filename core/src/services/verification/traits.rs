//! Collaborator contracts consumed by the verification state machine.

use async_trait::async_trait;
use std::collections::HashMap;

/// Key/value store with per-key time-to-live, holding one-time codes.
///
/// The store is shared mutable state across all accounts; each key
/// expires independently. No transactional guarantee is required across
/// two keys: the OTP key and the security-code key are manipulated
/// independently, relying on single-consumer semantics per account
/// rather than distributed locking.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Store `value` under `key`, expiring after `ttl_seconds`.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;

    /// Fetch the live value under `key`, if any. Expired keys read as
    /// absent.
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Remove `key` unconditionally.
    async fn delete(&self, key: &str) -> Result<(), String>;

    /// Remove `key` only if it still holds `expected`; returns whether
    /// the key was removed. Backends should execute this atomically
    /// (a single scripted check-and-remove) so concurrent consumers
    /// cannot both observe the same live code as theirs to delete.
    async fn delete_if_eq(&self, key: &str, expected: &str) -> Result<bool, String>;
}

/// Delivery channel understood by the notification dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationChannel {
    Email,
    Sms,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Sms => "sms",
        }
    }
}

/// Fire-and-forget notification dispatcher.
///
/// Templating and transport belong to the dispatcher; the core hands
/// over a template name and metadata. Failures surface to the caller of
/// the state machine as internal failures.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(
        &self,
        channel: NotificationChannel,
        recipient: &str,
        template_name: &str,
        metadata: HashMap<String, String>,
    ) -> Result<(), String>;
}
