use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{NewUser, Resource, User, ValidationError};
use crate::types::Document;

/// Errors surfaced by any store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("store unreachable: {0}")]
    Unreachable(String),

    #[error("stored document {id} is unreadable: {reason}")]
    Corrupt { id: Uuid, reason: String },

    #[error("document {id} could not be encoded for writing: {reason}")]
    Encode { id: Uuid, reason: String },

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unreachable(err.to_string())
            }
            other => StoreError::Sqlx(other),
        }
    }
}

/// Persistence for user credentials. Usernames are unique.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// CRUD-by-id over one document collection.
///
/// Writes take raw JSON and run [`Resource::validate`] before persisting;
/// a violation comes back as [`StoreError::Validation`]. Lookups by an id
/// that does not exist return `Ok(None)`.
#[async_trait]
pub trait DocumentStore<T: Resource>: Send + Sync {
    /// All documents in insertion order
    async fn list(&self) -> Result<Vec<Document<T>>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, StoreError>;

    async fn create(&self, body: Value) -> Result<Document<T>, StoreError>;

    /// Overwrite the given top-level fields and return the updated document
    async fn update_by_id(&self, id: Uuid, patch: Value) -> Result<Option<Document<T>>, StoreError>;

    /// Remove the document, returning what was removed
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, StoreError>;
}
