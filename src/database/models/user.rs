use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub username: String,
    /// bcrypt hash, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,
}

/// User row ready for insertion; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub username: String,
    pub password_hash: String,
}
