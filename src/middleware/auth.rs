use axum::{
    extract::{FromRef, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{TokenError, TokenService};
use crate::error::ApiError;
use crate::services::{CredentialError, CredentialService};
use crate::state::AppState;

/// Authenticated user resolved from the bearer token, attached to the request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// What the guard needs: token verification, user lookup and the header scheme
#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenService,
    pub credentials: CredentialService,
    pub scheme: Arc<str>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tokens: state.tokens.clone(),
            credentials: state.credentials.clone(),
            scheme: Arc::from(state.config.security.auth_scheme.as_str()),
        }
    }
}

/// Why a request was turned away. Callers only ever see 401 (or 500 for
/// store failures); the distinction is for the server log.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("Authorization header is not valid ASCII")]
    InvalidHeader,

    #[error("Authorization header must use the '{0}' scheme")]
    WrongScheme(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("token references unknown user '{0}'")]
    UnknownUser(String),

    #[error(transparent)]
    Store(#[from] CredentialError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(e) => {
                tracing::error!("Authentication lookup failed: {}", e);
                ApiError::internal()
            }
            _ => ApiError::unauthorized("Unauthorized"),
        }
    }
}

/// Pull the token out of `Authorization: <scheme> <token>`.
///
/// The scheme compares case-insensitively, so `JWT abc` and `jwt abc`
/// both pass for the default `jwt` scheme.
pub fn extract_token<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(given), Some(token)) if given.eq_ignore_ascii_case(scheme) => Ok(token),
        _ => Err(AuthError::WrongScheme(scheme.to_string())),
    }
}

/// Verify the bearer token and confirm its user still exists
pub async fn verify_bearer_token(headers: &HeaderMap, auth: &AuthState) -> Result<AuthUser, AuthError> {
    let token = extract_token(headers, &auth.scheme)?;
    let claims = auth.tokens.verify(token)?;

    let user = auth
        .credentials
        .find_user_by_username(&claims.username)
        .await?
        .ok_or_else(|| AuthError::UnknownUser(claims.username.clone()))?;

    Ok(AuthUser {
        id: user.id,
        username: user.username,
        name: user.name,
    })
}

/// Gate for protected routes: rejects with 401 before the handler runs
pub async fn jwt_auth_middleware(
    State(auth): State<AuthState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // The body is not Sync, so only the head is borrowed across the lookup
    let (mut parts, body) = request.into_parts();

    let auth_user = match verify_bearer_token(&parts.headers, &auth).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Rejected {} {}: {}", parts.method, parts.uri.path(), e);
            return Err(e.into());
        }
    };

    tracing::debug!("Authenticated user {}", auth_user.username);
    parts.extensions.insert(auth_user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
