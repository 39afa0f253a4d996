// handlers/public/auth/signup.rs - POST /signup handler

use axum::extract::State;
use serde::Deserialize;

use crate::api::Payload;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CredentialService;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Blank strings count as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/**
 * POST /signup - Create a user account
 *
 * Expected Input (JSON or urlencoded form):
 * ```json
 * {
 *   "name": "string",       // Optional: display name
 *   "username": "string",   // Required: unique login name
 *   "password": "string"    // Required: stored only as a bcrypt hash
 * }
 * ```
 *
 * Expected Output (Success, 201):
 * ```json
 * { "success": true, "msg": "Successfully created new user." }
 * ```
 *
 * Error Responses:
 * - 400: username or password missing or empty (the store is not touched)
 * - 409: username already taken
 * - 500: any other store failure, with the generic message
 */
pub async fn signup(
    State(credentials): State<CredentialService>,
    Payload(request): Payload<SignupRequest>,
) -> ApiResult<&'static str> {
    let (Some(username), Some(password)) = (present(request.username), present(request.password)) else {
        tracing::warn!("Signup rejected: missing username or password");
        return Err(ApiError::bad_request(
            "Please include both username and password to signup.",
        ));
    };

    credentials
        .create_user(request.name, &username, &password)
        .await?;

    tracing::info!("User created: {}", username);
    Ok(ApiResponse::created("msg", "Successfully created new user."))
}
