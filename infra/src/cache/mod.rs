//! Redis-backed ephemeral secret store.
//!
//! The domain core only ever sees the [`vf_core::services::verification::SecretStore`]
//! trait; this module provides the Redis client behind it, with retry
//! logic and an atomic check-and-remove for single-use codes.

pub mod redis_client;
pub mod secret_store;

pub use redis_client::RedisClient;
pub use secret_store::RedisSecretStore;

pub use vf_shared::config::cache::CacheConfig;
