// handlers/public/auth/signin.rs - POST /signin handler

use axum::extract::State;
use serde::Deserialize;

use crate::api::Payload;
use crate::auth::{TokenService, TOKEN_PREFIX};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CredentialService;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/**
 * POST /signin - Exchange username and password for a token
 *
 * Expected Input:
 * ```json
 * {
 *   "username": "string",
 *   "password": "string"
 * }
 * ```
 *
 * Expected Output (Success):
 * ```json
 * { "success": true, "token": "JWT eyJhbGciOiJIUzI1NiI..." }
 * ```
 *
 * The token is valid for one hour. Unknown users and wrong passwords are
 * both 401, with different messages.
 */
pub async fn signin(
    State(credentials): State<CredentialService>,
    State(tokens): State<TokenService>,
    Payload(request): Payload<SigninRequest>,
) -> ApiResult<String> {
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let user = credentials
        .find_user_by_username(&username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Signin failed: user '{}' not found", username);
            ApiError::unauthorized("Authentication failed. User not found.")
        })?;

    if !credentials.verify_password(&password, &user.password).await? {
        tracing::warn!("Signin failed: incorrect password for '{}'", username);
        return Err(ApiError::unauthorized(
            "Authentication failed. Incorrect password.",
        ));
    }

    let token = tokens.issue(user.id, &user.username).map_err(|e| {
        tracing::error!("Failed to issue token for '{}': {}", user.username, e);
        ApiError::internal()
    })?;

    tracing::info!("User signed in: {}", user.username);
    Ok(ApiResponse::success("token", format!("{} {}", TOKEN_PREFIX, token)))
}
