//! Redis-backed implementation of the core's secret store trait.

use async_trait::async_trait;
use tracing::debug;

use vf_core::services::verification::SecretStore;

use super::redis_client::RedisClient;

/// [`SecretStore`] over a [`RedisClient`].
///
/// Keys carry their TTL server-side, so expiry needs no sweeper; the
/// check-and-remove behind `delete_if_eq` runs as a single Lua script.
#[derive(Clone)]
pub struct RedisSecretStore {
    client: RedisClient,
}

impl RedisSecretStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for RedisSecretStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        debug!(key, ttl_seconds, "storing secret");
        self.client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(key).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.client
            .delete(key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn delete_if_eq(&self, key: &str, expected: &str) -> Result<bool, String> {
        self.client
            .delete_if_eq(key, expected)
            .await
            .map_err(|e| e.to_string())
    }
}
