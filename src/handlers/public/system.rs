// handlers/public/system.rs - Unauthenticated service endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - Service name, version and route listing
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "endpoints": {
            "public": ["POST /signup", "POST /signin", "GET /health"],
            "protected": [
                "GET /movies", "POST /movies",
                "GET /movies/:movieId", "PUT /movies/:movieId", "DELETE /movies/:movieId",
                "GET /reviews", "POST /reviews",
                "GET /reviews/:reviewId", "PUT /reviews/:reviewId", "DELETE /reviews/:reviewId"
            ]
        }
    }))
}

/// GET /health - 200 while the backing store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let backend = match &state.database {
        Some(database) => {
            database.health_check().await?;
            "postgres"
        }
        None => "memory",
    };

    Ok((
        StatusCode::OK,
        Json(json!({ "status": "ok", "store": backend })),
    ))
}
