use std::sync::Arc;

use crate::auth::password::{self, BcryptError};
use crate::database::models::{NewUser, User};
use crate::database::store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),
    #[error("Credential store unreachable: {0}")]
    Unreachable(String),
    #[error("Password hashing error: {0}")]
    Hashing(#[from] BcryptError),
    #[error("Credential store error: {0}")]
    Internal(String),
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(username) => CredentialError::DuplicateUsername(username),
            StoreError::Unreachable(msg) => CredentialError::Unreachable(msg),
            other => CredentialError::Internal(other.to_string()),
        }
    }
}

/// User accounts and password checks on top of a [`UserStore`].
///
/// bcrypt work runs on the blocking pool so it never stalls the
/// request executor.
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Hash the password and persist a new user
    pub async fn create_user(
        &self,
        name: Option<String>,
        username: &str,
        plaintext: &str,
    ) -> Result<User, CredentialError> {
        let cost = self.bcrypt_cost;
        let plaintext = plaintext.to_string();
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext, cost))
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))??;

        let user = self
            .users
            .insert(NewUser {
                name,
                username: username.to_string(),
                password_hash,
            })
            .await?;

        Ok(user)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, CredentialError> {
        Ok(self.users.find_by_username(username).await?)
    }

    pub async fn verify_password(&self, plaintext: &str, stored_hash: &str) -> Result<bool, CredentialError> {
        let plaintext = plaintext.to_string();
        let stored_hash = stored_hash.to_string();

        let matches = tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored_hash))
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))??;

        Ok(matches)
    }
}
