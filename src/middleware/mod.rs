pub mod auth;
pub mod response;

pub use auth::{jwt_auth_middleware, verify_bearer_token, AuthError, AuthState, AuthUser};
pub use response::{ApiResponse, ApiResult};
