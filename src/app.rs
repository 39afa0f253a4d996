use axum::{
    extract::{DefaultBodyLimit, FromRef},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::models::{Movie, Resource, Review};
use crate::database::DocumentStore;
use crate::handlers::protected::resource::{self, ResourceState};
use crate::handlers::public::{auth, system};
use crate::handlers::{method_not_supported, route_not_found};
use crate::middleware::{jwt_auth_middleware, AuthState};
use crate::state::AppState;

/// Build the full router for the given state
pub fn app(state: AppState) -> Router {
    let auth_state = AuthState::from_ref(&state);
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(auth_routes())
        // Protected
        .merge(resource_routes::<Movie, _>(
            "/movies",
            "/movies/:movieId",
            state.movies.clone(),
            auth_state.clone(),
        ))
        .merge(resource_routes::<Review, _>(
            "/reviews",
            "/reviews/:reviewId",
            state.reviews.clone(),
            auth_state,
        ))
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup).fallback(method_not_supported))
        .route("/signin", post(auth::signin).fallback(method_not_supported))
}

/// Collection and item routes for one resource, all behind the JWT guard.
///
/// The guard is a route layer, so methods that are not bound fall through
/// to the 405 handler without needing a token.
fn resource_routes<T, S>(
    collection: &str,
    item: &str,
    store: Arc<dyn DocumentStore<T>>,
    auth_state: AuthState,
) -> Router<S>
where
    T: Resource,
    S: Clone + Send + Sync + 'static,
{
    let guard = middleware::from_fn_with_state(auth_state, jwt_auth_middleware);

    Router::new()
        .route(
            collection,
            get(resource::list::<T>)
                .post(resource::create::<T>)
                .route_layer(guard.clone())
                .fallback(method_not_supported),
        )
        .route(
            item,
            get(resource::show::<T>)
                .put(resource::update::<T>)
                .delete(resource::delete::<T>)
                .route_layer(guard)
                .fallback(method_not_supported),
        )
        .with_state(ResourceState::new(store))
}
