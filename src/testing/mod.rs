use crate::auth::TOKEN_PREFIX;
use crate::config::AppConfig;
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-secret-do-not-use";

/// Development config with a fixed secret and the cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.url = None;
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config.api.enable_request_logging = false;
    config
}

pub fn test_state() -> AppState {
    AppState::in_memory(test_config()).expect("test state")
}

/// Create `username` with password "password" and return a ready
/// Authorization header value
pub async fn signed_up_header(state: &AppState, username: &str) -> String {
    let user = state
        .credentials
        .create_user(None, username, "password")
        .await
        .expect("create test user");
    let token = state
        .tokens
        .issue(user.id, &user.username)
        .expect("issue test token");
    format!("{} {}", TOKEN_PREFIX, token)
}
