use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod password;

/// Lifetime of every issued token
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Scheme prefix the signin endpoint puts in front of the token
pub const TOKEN_PREFIX: &str = "JWT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(id: Uuid, username: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        let exp = issued_at + Duration::hours(TOKEN_TTL_HOURS);

        Self {
            id: id.to_string(),
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("token signature does not match")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,
}

/// Issues and verifies HS256 tokens with a single shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Sign a token for the user, valid for one hour from now
    pub fn issue(&self, id: Uuid, username: &str) -> Result<String, TokenError> {
        self.issue_at(id, username, Utc::now())
    }

    pub fn issue_at(
        &self,
        id: Uuid,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(id, username, issued_at);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Check signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}
