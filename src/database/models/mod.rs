use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod movie;
pub mod review;
pub mod user;

pub use movie::{Actor, Genre, Movie};
pub use review::Review;
pub use user::{NewUser, User};

use crate::types::ID_FIELD;

/// A document collection exposed through the generic CRUD handlers.
///
/// `validate` runs on every write, after the JSON body has been decoded
/// into the typed document and before anything is persisted.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human-readable name used in client messages ("Movie not found")
    const NAME: &'static str;

    /// Backing table / collection name
    const COLLECTION: &'static str;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Schema constraint violation on a write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, reason: impl Into<String>) -> Self {
        self.field_errors.insert(field.into(), reason.into());
        self
    }
}

/// Decode a request body into a typed document and validate it.
///
/// A client-supplied `_id` is ignored; identifiers belong to the store.
pub fn decode<T: Resource>(value: Value) -> Result<T, ValidationError> {
    let Value::Object(mut fields) = value else {
        return Err(ValidationError::new(format!("{} must be a JSON object", T::NAME)));
    };
    fields.remove(ID_FIELD);

    let document: T = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ValidationError::new(e.to_string()))?;
    document.validate()?;

    Ok(document)
}

/// Overwrite top-level fields of `current` with `patch`, then re-validate
pub fn apply_patch<T: Resource>(current: &T, patch: Value) -> Result<T, ValidationError> {
    let Value::Object(patch) = patch else {
        return Err(ValidationError::new(format!("{} update must be a JSON object", T::NAME)));
    };

    let mut merged = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => return Err(ValidationError::new(e.to_string())),
    };

    for (key, value) in patch {
        if key != ID_FIELD {
            merged.insert(key, value);
        }
    }

    decode(Value::Object(merged))
}
