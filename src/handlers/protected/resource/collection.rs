// handlers/protected/resource/collection.rs - GET/POST on a collection

use axum::extract::State;
use serde_json::Value;

use super::{store_failure, ResourceState};
use crate::api::Payload;
use crate::database::models::Resource;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Document;

/// GET /<collection> - Every document, in store order
pub async fn list<T: Resource>(State(state): State<ResourceState<T>>) -> ApiResult<Vec<Document<T>>> {
    let documents = state
        .store
        .list()
        .await
        .map_err(|e| store_failure::<T>("List", e))?;

    Ok(ApiResponse::bare(documents))
}

/// POST /<collection> - Create a document from the full body
///
/// Any failure to save, including a schema violation, is reported as a
/// generic 500. Only updates surface validation errors as 400.
pub async fn create<T: Resource>(
    State(state): State<ResourceState<T>>,
    Payload(body): Payload<Value>,
) -> ApiResult<Document<T>> {
    let document = state
        .store
        .create(body)
        .await
        .map_err(|e| store_failure::<T>("Create", e))?;

    tracing::info!("Created {} {}", T::NAME, document.id);
    Ok(ApiResponse::created(T::NAME.to_lowercase(), document))
}
