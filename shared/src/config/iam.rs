//! Configuration for the external identity provider (Keycloak).

use serde::{Deserialize, Serialize};

/// Keycloak connection and realm configuration.
///
/// The admin credentials authorize user management calls (creating users,
/// resetting credentials); the client credentials authorize token grants.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IamConfig {
    /// Base URL of the Keycloak server, without a trailing slash
    pub server_url: String,

    /// Realm holding the application's users
    pub realm: String,

    /// OIDC client id
    pub client_id: String,

    /// OIDC client secret
    pub client_secret: String,

    /// Admin account username for the realm
    pub admin_username: String,

    /// Admin account password for the realm
    pub admin_password: String,
}

impl Default for IamConfig {
    fn default() -> Self {
        Self {
            server_url: String::from("http://localhost:8080"),
            realm: String::from("veriflow"),
            client_id: String::from("veriflow-backend"),
            client_secret: String::new(),
            admin_username: String::from("admin"),
            admin_password: String::new(),
        }
    }
}

impl IamConfig {
    /// Load the configuration from `KEYCLOAK_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_url: std::env::var("KEYCLOAK_SERVER_URL").unwrap_or(defaults.server_url),
            realm: std::env::var("KEYCLOAK_REALM").unwrap_or(defaults.realm),
            client_id: std::env::var("KEYCLOAK_CLIENT_ID").unwrap_or(defaults.client_id),
            client_secret: std::env::var("KEYCLOAK_CLIENT_SECRET").unwrap_or(defaults.client_secret),
            admin_username: std::env::var("KEYCLOAK_ADMIN_USERNAME")
                .unwrap_or(defaults.admin_username),
            admin_password: std::env::var("KEYCLOAK_ADMIN_PASSWORD")
                .unwrap_or(defaults.admin_password),
        }
    }
}
