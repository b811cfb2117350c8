//! Configuration for the external notification dispatcher.

use serde::{Deserialize, Serialize};

/// Notification service endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// Base URL of the notification service, without a trailing slash
    pub base_url: String,

    /// Bearer token authorizing dispatch requests
    pub api_key: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:9090"),
            api_key: String::new(),
        }
    }
}

impl NotifierConfig {
    /// Load the configuration from `NOTIFIER_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("NOTIFIER_BASE_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("NOTIFIER_API_KEY").unwrap_or(defaults.api_key),
        }
    }
}
