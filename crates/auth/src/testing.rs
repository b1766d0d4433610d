//! In-memory user and token stores for auth tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use texnomart_core::auth::{ApiToken, NewUser, User};
use texnomart_core::storage::{RepositoryError, Result, TokenRepository, UserRepository};

use crate::{AuthConfig, AuthState};

#[derive(Default)]
pub struct MemoryUsers {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.username.clone(),
            });
        }
        let created = User {
            id: users.len() as i64 + 1,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: true,
            date_joined: user.date_joined,
            last_login: None,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| RepositoryError::not_found("User", user.id))?;
        *slot = user.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokens {
    tokens: RwLock<HashMap<i64, ApiToken>>,
}

#[async_trait]
impl TokenRepository for MemoryTokens {
    async fn get_token(&self, key: &str) -> Result<Option<ApiToken>> {
        Ok(self
            .tokens
            .read()
            .await
            .values()
            .find(|t| t.key == key)
            .cloned())
    }

    async fn get_token_for_user(&self, user_id: i64) -> Result<Option<ApiToken>> {
        Ok(self.tokens.read().await.get(&user_id).cloned())
    }

    async fn create_token(&self, token: &ApiToken) -> Result<()> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.user_id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Token",
                id: token.user_id.to_string(),
            });
        }
        tokens.insert(token.user_id, token.clone());
        Ok(())
    }

    async fn delete_token_for_user(&self, user_id: i64) -> Result<()> {
        self.tokens
            .write()
            .await
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Token", user_id))
    }
}

pub fn auth_state() -> AuthState {
    AuthState::new(
        Arc::new(MemoryUsers::default()),
        Arc::new(MemoryTokens::default()),
        AuthConfig::new("test-secret").with_bcrypt_cost(crate::BCRYPT_MIN_COST),
    )
}
