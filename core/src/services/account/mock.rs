//! Mock identity provider for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use super::traits::{IamTokenPair, IdentityProvider};

#[derive(Debug, Clone)]
struct IamUser {
    username: String,
    password: String,
    #[allow(dead_code)]
    email: String,
}

/// In-memory identity provider recording every call.
pub struct MockIdentityProvider {
    users: Mutex<HashMap<String, IamUser>>,
    password_changes: Mutex<Vec<(String, String)>>,
    should_fail: bool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            password_changes: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    /// A provider whose every call fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            password_changes: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// Provider-side id of the mirrored user with this username.
    pub fn provider_id_for(&self, username: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|(_, user)| user.username == username)
            .map(|(id, _)| id.clone())
    }

    /// Every `(provider_id, new_password)` recorded by `change_password`.
    pub fn password_changes(&self) -> Vec<(String, String)> {
        self.password_changes.lock().unwrap().clone()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("identity provider unavailable".to_string());
        }
        let provider_id = format!("iam-{}", Uuid::new_v4());
        self.users.lock().unwrap().insert(
            provider_id.clone(),
            IamUser {
                username: username.to_string(),
                password: password.to_string(),
                email: email.to_string(),
            },
        );
        Ok(provider_id)
    }

    async fn change_password(
        &self,
        provider_id: &str,
        new_password: &str,
    ) -> Result<(), String> {
        if self.should_fail {
            return Err("identity provider unavailable".to_string());
        }
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(provider_id)
            .ok_or_else(|| "unknown provider id".to_string())?;
        user.password = new_password.to_string();
        self.password_changes
            .lock()
            .unwrap()
            .push((provider_id.to_string(), new_password.to_string()));
        Ok(())
    }

    async fn issue_token(&self, username: &str, password: &str) -> Result<IamTokenPair, String> {
        if self.should_fail {
            return Err("identity provider unavailable".to_string());
        }
        let users = self.users.lock().unwrap();
        let valid = users
            .values()
            .any(|user| user.username == username && user.password == password);
        if !valid {
            return Err("invalid credentials".to_string());
        }
        Ok(IamTokenPair {
            access_token: format!("access-{username}"),
            refresh_token: format!("refresh-{username}"),
        })
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<IamTokenPair, String> {
        if self.should_fail {
            return Err("identity provider unavailable".to_string());
        }
        let username = refresh_token
            .strip_prefix("refresh-")
            .ok_or_else(|| "refresh token is not active".to_string())?;
        Ok(IamTokenPair {
            access_token: format!("access-{username}"),
            refresh_token: refresh_token.to_string(),
        })
    }
}
