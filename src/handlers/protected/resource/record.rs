// handlers/protected/resource/record.rs - GET/PUT/DELETE on a single document

use axum::extract::{Path, State};
use serde_json::Value;
use uuid::Uuid;

use super::{store_failure, ResourceState};
use crate::api::Payload;
use crate::database::models::Resource;
use crate::database::StoreError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Document;

/// Malformed ids are a 400, distinct from the 404 for an id that is absent
fn parse_id<T: Resource>(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} ID.", T::NAME)))
}

fn not_found<T: Resource>() -> ApiError {
    ApiError::not_found(format!("{} not found", T::NAME))
}

/// GET /<collection>/:id
pub async fn show<T: Resource>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<String>,
) -> ApiResult<Document<T>> {
    let id = parse_id::<T>(&id)?;

    let document = state
        .store
        .find_by_id(id)
        .await
        .map_err(|e| store_failure::<T>("Get", e))?
        .ok_or_else(not_found::<T>)?;

    Ok(ApiResponse::bare(document))
}

/// PUT /<collection>/:id - Overwrite the supplied top-level fields
pub async fn update<T: Resource>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<String>,
    Payload(patch): Payload<Value>,
) -> ApiResult<Document<T>> {
    let id = parse_id::<T>(&id)?;

    let document = match state.store.update_by_id(id, patch).await {
        Ok(Some(document)) => document,
        Ok(None) => return Err(not_found::<T>()),
        Err(StoreError::Validation(e)) => {
            tracing::warn!("Rejected {} {} update: {}", T::NAME, id, e);
            let field_errors = (!e.field_errors.is_empty()).then_some(e.field_errors);
            return Err(ApiError::validation_error(
                format!("Invalid {} information.", T::NAME),
                field_errors,
            ));
        }
        Err(e) => return Err(store_failure::<T>("Update", e)),
    };

    tracing::info!("Updated {} {}", T::NAME, id);
    Ok(ApiResponse::success(T::NAME.to_lowercase(), document))
}

/// DELETE /<collection>/:id
pub async fn delete<T: Resource>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<String>,
) -> ApiResult<String> {
    let id = parse_id::<T>(&id)?;

    state
        .store
        .delete_by_id(id)
        .await
        .map_err(|e| store_failure::<T>("Delete", e))?
        .ok_or_else(not_found::<T>)?;

    tracing::info!("Deleted {} {}", T::NAME, id);
    Ok(ApiResponse::success(
        "message",
        format!("{} deleted successfully", T::NAME),
    ))
}
