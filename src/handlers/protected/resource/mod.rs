// handlers/protected/resource/mod.rs - Generic CRUD handlers
//
// One handler set serves every document collection. The collection is
// chosen by the `T: Resource` parameter when the routes are built, and
// `T::NAME` feeds the client-facing messages.

use std::sync::Arc;

use crate::database::models::Resource;
use crate::database::{DocumentStore, StoreError};
use crate::error::ApiError;

pub mod collection; // GET/POST /<collection>
pub mod record; // GET/PUT/DELETE /<collection>/:id

pub use collection::{create, list};
pub use record::{delete, show, update};

/// Router state for one collection's handlers
pub struct ResourceState<T: Resource> {
    pub store: Arc<dyn DocumentStore<T>>,
}

impl<T: Resource> ResourceState<T> {
    pub fn new(store: Arc<dyn DocumentStore<T>>) -> Self {
        Self { store }
    }
}

impl<T: Resource> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

/// Log the store failure and hand back the generic 500
pub(crate) fn store_failure<T: Resource>(operation: &str, err: StoreError) -> ApiError {
    tracing::error!("{} {} failed: {}", operation, T::NAME, err);
    ApiError::internal()
}
