use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task;

use crate::config::SecurityConfig;

/// A registered user. Only the hash of the password is ever held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("Username already taken: {0}")]
    UsernameTaken(String),
}

/// Storage for registered users.
///
/// Implementations must reject a second user with an existing username.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> Result<(), UserStoreError>;

    async fn find_by_username(&self, username: &str) -> Option<User>;
}

/// Users kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<(), UserStoreError> {
        // Check and push under one write lock so concurrent registrations of
        // the same name cannot both succeed.
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserStoreError::UsernameTaken(user.username));
        }
        users.push(user);
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check `password` against a stored PHC hash string.
///
/// The cost parameters are read from the hash itself.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Runs [`hash_password`] on the blocking pool; Argon2 would otherwise stall
/// the async runtime.
pub async fn hash_password_blocking(password: String, config: SecurityConfig) -> Result<String> {
    task::spawn_blocking(move || hash_password(&password, &config))
        .await
        .context("Password hashing task panicked")?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: String, password_hash: String) -> Result<bool> {
    task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .context("Password verification task panicked")?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter2", &cheap_config()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let config = cheap_config();
        let a = hash_password("same", &config).unwrap();
        let b = hash_password("same", &config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("pw", "not-a-hash").is_err());
    }

    #[tokio::test]
    async fn test_repository_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        let user = User {
            username: "bond".to_string(),
            password_hash: "x".to_string(),
        };

        repo.insert(user.clone()).await.unwrap();
        let err = repo.insert(user).await.unwrap_err();

        assert_eq!(err, UserStoreError::UsernameTaken("bond".to_string()));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_repository_lookup() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.is_empty().await);
        assert!(repo.find_by_username("q").await.is_none());

        repo.insert(User {
            username: "q".to_string(),
            password_hash: "h".to_string(),
        })
        .await
        .unwrap();

        let found = repo.find_by_username("q").await.unwrap();
        assert_eq!(found.password_hash, "h");
        assert!(repo.find_by_username("Q").await.is_none());
    }
}
