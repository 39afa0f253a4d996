use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sqlx::{types::Json, PgPool};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::database::models::{apply_patch, decode, NewUser, Resource, User};
use crate::database::store::{DocumentStore, StoreError, UserStore};
use crate::types::Document;

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

type DocumentRow = (Uuid, Json<Value>);

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, username, password)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, username, password",
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(StoreError::DuplicateUsername(user.username))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// JSONB-backed collection; one row per document in `T::COLLECTION`
pub struct PgDocumentStore<T> {
    pool: PgPool,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Resource> PgDocumentStore<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    /// Quoted table name; COLLECTION is a compile-time constant
    fn table() -> String {
        format!("\"{}\"", T::COLLECTION.replace('"', "\"\""))
    }

    fn to_document((id, Json(doc)): DocumentRow) -> Result<Document<T>, StoreError> {
        serde_json::from_value(doc)
            .map(|body| Document::new(id, body))
            .map_err(|e| StoreError::Corrupt {
                id,
                reason: e.to_string(),
            })
    }

}

/// Encode a document body for a JSONB column before it is written
fn encode<S: Serialize>(id: Uuid, body: &S) -> Result<Json<Value>, StoreError> {
    serde_json::to_value(body)
        .map(Json)
        .map_err(|e| StoreError::Encode {
            id,
            reason: e.to_string(),
        })
}

#[async_trait]
impl<T: Resource> DocumentStore<T> for PgDocumentStore<T> {
    async fn list(&self) -> Result<Vec<Document<T>>, StoreError> {
        let sql = format!("SELECT id, doc FROM {} ORDER BY created_at, id", Self::table());
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::to_document).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, StoreError> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", Self::table());
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::to_document).transpose()
    }

    async fn create(&self, body: Value) -> Result<Document<T>, StoreError> {
        let id = Uuid::new_v4();
        let document = decode::<T>(body)?;

        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", Self::table());
        sqlx::query(&sql)
            .bind(id)
            .bind(encode(id, &document)?)
            .execute(&self.pool)
            .await?;

        Ok(Document::new(id, document))
    }

    async fn update_by_id(&self, id: Uuid, patch: Value) -> Result<Option<Document<T>>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT id, doc FROM {} WHERE id = $1 FOR UPDATE", Self::table());
        let Some(row) = sqlx::query_as::<_, DocumentRow>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let current = Self::to_document(row)?;
        let updated = apply_patch(&current.body, patch)?;

        let update = format!(
            "UPDATE {} SET doc = $2, updated_at = now() WHERE id = $1",
            Self::table()
        );
        sqlx::query(&update)
            .bind(id)
            .bind(encode(id, &updated)?)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(Document::new(id, updated)))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id, doc", Self::table());
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::to_document).transpose()
    }
}
