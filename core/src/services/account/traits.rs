//! Contract with the external identity provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by the identity provider.
///
/// The provider's internal token format is opaque to this core; the
/// pair is passed through to callers untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamTokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// External IAM system of record for authentication credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Mirror an account into the IAM; returns the provider-side id.
    async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<String, String>;

    /// Overwrite the credential secret of a provider-side user.
    async fn change_password(&self, provider_id: &str, new_password: &str)
        -> Result<(), String>;

    /// Exchange credentials for a token pair.
    async fn issue_token(&self, username: &str, password: &str) -> Result<IamTokenPair, String>;

    /// Exchange a refresh token for a fresh pair.
    async fn refresh_token(&self, refresh_token: &str) -> Result<IamTokenPair, String>;
}
