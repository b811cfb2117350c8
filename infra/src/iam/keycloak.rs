//! Keycloak REST client implementing the core's identity provider trait.
//!
//! Two credential sets are in play: the realm admin account authorizes
//! user management through the admin API, while the OIDC client
//! credentials authorize token grants for end users.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use vf_core::services::account::{IamTokenPair, IdentityProvider};
use vf_shared::config::iam::IamConfig;

use crate::InfrastructureError;

/// Token response from Keycloak's OIDC token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

/// HTTP client for a single Keycloak realm.
#[derive(Clone)]
pub struct KeycloakClient {
    http: reqwest::Client,
    config: IamConfig,
}

impl KeycloakClient {
    pub fn new(config: IamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn token_endpoint(&self, realm: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.config.server_url, realm
        )
    }

    fn admin_users_endpoint(&self) -> String {
        format!(
            "{}/admin/realms/{}/users",
            self.config.server_url, self.config.realm
        )
    }

    /// Obtain an admin access token through the master realm.
    async fn admin_token(&self) -> Result<String, InfrastructureError> {
        let params = [
            ("grant_type", "password"),
            ("client_id", "admin-cli"),
            ("username", self.config.admin_username.as_str()),
            ("password", self.config.admin_password.as_str()),
        ];

        let response = self
            .http
            .post(self.token_endpoint("master"))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, "keycloak admin token request rejected");
            return Err(InfrastructureError::Iam(format!(
                "admin token request failed with status {status}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn create_user_inner(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<String, InfrastructureError> {
        let admin_token = self.admin_token().await?;

        let body = json!({
            "username": username,
            "email": email,
            "enabled": true,
            "emailVerified": false,
            "credentials": [{
                "type": "password",
                "value": password,
                "temporary": false,
            }],
        });

        let response = self
            .http
            .post(self.admin_users_endpoint())
            .bearer_auth(&admin_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, username, "keycloak user creation rejected");
            return Err(InfrastructureError::Iam(format!(
                "user creation failed with status {status}"
            )));
        }

        // Keycloak returns the new user's id only through the Location
        // header of the 201 response.
        let user_id = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|location| location.to_str().ok())
            .and_then(|location| location.rsplit('/').next())
            .map(str::to_string)
            .ok_or_else(|| {
                InfrastructureError::Iam("user creation response had no location header".to_string())
            })?;

        info!(username, "keycloak user created");
        Ok(user_id)
    }

    async fn change_password_inner(
        &self,
        provider_id: &str,
        new_password: &str,
    ) -> Result<(), InfrastructureError> {
        let admin_token = self.admin_token().await?;

        let body = json!({
            "type": "password",
            "value": new_password,
            "temporary": false,
        });

        let response = self
            .http
            .put(format!(
                "{}/{}/reset-password",
                self.admin_users_endpoint(),
                provider_id
            ))
            .bearer_auth(&admin_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, provider_id, "keycloak password reset rejected");
            return Err(InfrastructureError::Iam(format!(
                "password reset failed with status {status}"
            )));
        }

        info!(provider_id, "keycloak password updated");
        Ok(())
    }

    async fn grant(&self, params: &[(&str, &str)]) -> Result<IamTokenPair, InfrastructureError> {
        let response = self
            .http
            .post(self.token_endpoint(&self.config.realm))
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            debug!(%status, "keycloak token grant rejected");
            return Err(InfrastructureError::Iam(format!(
                "token grant failed with status {status}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        let refresh_token = token.refresh_token.ok_or_else(|| {
            InfrastructureError::Iam("token grant response had no refresh token".to_string())
        })?;

        Ok(IamTokenPair {
            access_token: token.access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl IdentityProvider for KeycloakClient {
    async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<String, String> {
        self.create_user_inner(username, password, email)
            .await
            .map_err(|e| e.to_string())
    }

    async fn change_password(&self, provider_id: &str, new_password: &str) -> Result<(), String> {
        self.change_password_inner(provider_id, new_password)
            .await
            .map_err(|e| e.to_string())
    }

    async fn issue_token(&self, username: &str, password: &str) -> Result<IamTokenPair, String> {
        let params = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("username", username),
            ("password", password),
        ];
        self.grant(&params).await.map_err(|e| e.to_string())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<IamTokenPair, String> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];
        self.grant(&params).await.map_err(|e| e.to_string())
    }
}
