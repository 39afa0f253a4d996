/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire name of the store-assigned identifier
pub const ID_FIELD: &str = "_id";

/// A persisted document: store-assigned id plus the resource body,
/// serialized flat as `{"_id": ..., ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Document<T> {
    pub fn new(id: Uuid, body: T) -> Self {
        Self { id, body }
    }
}
