use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{ApiError, GENERIC_FAILURE};

/// Success response, either bare or wrapped as `{"success": true, <key>: data}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub key: Option<String>,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Serialize `data` as the whole body with 200 OK
    pub fn bare(data: T) -> Self {
        Self {
            data,
            key: None,
            status_code: None,
        }
    }

    /// `{"success": true, <key>: data}` with 200 OK
    pub fn success(key: impl Into<String>, data: T) -> Self {
        Self {
            data,
            key: Some(key.into()),
            status_code: None,
        }
    }

    /// Create a 201 Created response
    pub fn created(key: impl Into<String>, data: T) -> Self {
        Self::success(key, data).with_status(StatusCode::CREATED)
    }

    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return ApiError::internal_server_error(GENERIC_FAILURE).into_response();
            }
        };

        let body = match self.key {
            Some(key) => {
                let mut envelope = json!({ "success": true });
                envelope[key.as_str()] = data_value;
                envelope
            }
            None => data_value,
        };

        (status, Json::<Value>(body)).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
