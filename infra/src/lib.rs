//! Infrastructure layer: concrete implementations of the collaborator
//! traits the domain core defines.
//!
//! - **cache**: Redis-backed ephemeral secret store for one-time codes
//! - **iam**: Keycloak client acting as the identity provider
//! - **notify**: HTTP client for the external notification service

pub mod cache;
pub mod iam;
pub mod notify;

use serde::{Deserialize, Serialize};

use vf_shared::config::cache::CacheConfig;
use vf_shared::config::iam::IamConfig;
use vf_shared::config::notifier::NotifierConfig;

/// Configuration for every external service this layer talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureConfig {
    pub cache: CacheConfig,
    pub iam: IamConfig,
    pub notifier: NotifierConfig,
}

/// Load infrastructure configuration from the environment,
/// reading a `.env` file first when one is present.
pub fn load_config() -> InfrastructureConfig {
    dotenvy::dotenv().ok();

    InfrastructureConfig {
        cache: CacheConfig::from_env(),
        iam: IamConfig::from_env(),
        notifier: NotifierConfig::from_env(),
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis secret store error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Identity provider rejected or garbled a request
    #[error("IAM error: {0}")]
    Iam(String),

    /// Notification service rejected a dispatch
    #[error("Notification error: {0}")]
    Notify(String),
}
