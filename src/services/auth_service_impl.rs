//! Default implementation of the `AuthService` trait.

use std::sync::Arc;

use crate::config::SecurityConfig;
use crate::db::repositories::user::{
    User, UserRepository, UserStoreError, hash_password_blocking, verify_password_blocking,
};
use crate::services::auth_service::{AuthError, AuthService, Identity, LoginResult};
use crate::services::token::TokenService;
use async_trait::async_trait;
use tracing::info;

pub struct DefaultAuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
    security: SecurityConfig,
}

impl DefaultAuthService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, security: SecurityConfig) -> Self {
        let tokens = TokenService::from_config(&security);
        Self {
            users,
            tokens,
            security,
        }
    }
}

#[async_trait]
impl AuthService for DefaultAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let password_hash =
            hash_password_blocking(password.to_string(), self.security.clone()).await?;

        self.users
            .insert(User {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                UserStoreError::UsernameTaken(name) => AuthError::UsernameTaken(name),
            })?;

        info!(username, "Registered user");
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = verify_password_blocking(password.to_string(), user.password_hash).await?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&user.username)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(LoginResult { token })
    }

    fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        self.tokens
            .verify(token)
            .map(|claims| Identity {
                username: claims.username,
            })
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}
