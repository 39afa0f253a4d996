// handlers/fallback.rs - Responses for unbound methods and unknown paths

use crate::error::ApiError;

/// Any method not bound on a declared path
pub async fn method_not_supported() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Any path not declared at all
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
