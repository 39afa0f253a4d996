use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{apply_patch, decode, NewUser, Resource, User};
use crate::database::store::{DocumentStore, StoreError, UserStore};
use crate::types::Document;

/// Process-local user store for tests and database-less development
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            username: user.username,
            password: user.password_hash,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

/// Process-local document collection; insertion order is list order
pub struct MemoryDocumentStore<T> {
    documents: RwLock<Vec<Document<T>>>,
}

impl<T> MemoryDocumentStore<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for MemoryDocumentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Resource> DocumentStore<T> for MemoryDocumentStore<T> {
    async fn list(&self) -> Result<Vec<Document<T>>, StoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, body: Value) -> Result<Document<T>, StoreError> {
        let document = Document::new(Uuid::new_v4(), decode::<T>(body)?);
        self.documents.write().await.push(document.clone());
        Ok(document)
    }

    async fn update_by_id(&self, id: Uuid, patch: Value) -> Result<Option<Document<T>>, StoreError> {
        let mut documents = self.documents.write().await;
        let Some(existing) = documents.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };

        existing.body = apply_patch(&existing.body, patch)?;
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, StoreError> {
        let mut documents = self.documents.write().await;
        let position = documents.iter().position(|d| d.id == id);
        Ok(position.map(|index| documents.remove(index)))
    }
}
