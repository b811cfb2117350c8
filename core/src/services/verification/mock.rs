//! Mock collaborator implementations for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::traits::{NotificationChannel, NotificationDispatcher, SecretStore};

/// In-memory secret store honouring per-key TTLs.
pub struct MockSecretStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    should_fail: bool,
}

impl MockSecretStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            should_fail: false,
        }
    }

    /// A store whose every operation fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            should_fail: true,
        }
    }

    fn live_value(entries: &mut HashMap<String, (String, Instant)>, key: &str) -> Option<String> {
        match entries.get(key) {
            Some((value, deadline)) if *deadline > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}

impl Default for MockSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        if self.should_fail {
            return Err("secret store unavailable".to_string());
        }
        let deadline = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        if self.should_fail {
            return Err("secret store unavailable".to_string());
        }
        let mut entries = self.entries.lock().unwrap();
        Ok(Self::live_value(&mut entries, key))
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("secret store unavailable".to_string());
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn delete_if_eq(&self, key: &str, expected: &str) -> Result<bool, String> {
        if self.should_fail {
            return Err("secret store unavailable".to_string());
        }
        let mut entries = self.entries.lock().unwrap();
        match Self::live_value(&mut entries, key) {
            Some(value) if value == expected => {
                entries.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// A notification captured by [`MockNotificationDispatcher`].
#[derive(Debug, Clone)]
pub struct SentNotification {
    pub channel: NotificationChannel,
    pub recipient: String,
    pub template_name: String,
    pub metadata: HashMap<String, String>,
}

/// Recording notification dispatcher for testing.
pub struct MockNotificationDispatcher {
    sent: Mutex<Vec<SentNotification>>,
    should_fail: bool,
}

impl MockNotificationDispatcher {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    /// A dispatcher whose every send fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// Everything dispatched so far, in order.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }

    /// Metadata value from the most recent notification to `recipient`.
    /// Tests use this to pull the OTP that was "delivered" out-of-band.
    pub fn last_metadata_value(&self, recipient: &str, key: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|notification| notification.recipient == recipient)
            .and_then(|notification| notification.metadata.get(key).cloned())
    }
}

impl Default for MockNotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationDispatcher for MockNotificationDispatcher {
    async fn send(
        &self,
        channel: NotificationChannel,
        recipient: &str,
        template_name: &str,
        metadata: HashMap<String, String>,
    ) -> Result<(), String> {
        if self.should_fail {
            return Err("notification service unavailable".to_string());
        }
        self.sent.lock().unwrap().push(SentNotification {
            channel,
            recipient: recipient.to_string(),
            template_name: template_name.to_string(),
            metadata,
        });
        Ok(())
    }
}
