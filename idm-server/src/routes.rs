use crate::api::auth::auth::{login, me, register};
use crate::api::users::users::list_users;
use crate::{AppState, gate, health};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    // Everything behind the gate: handlers here can rely on a resolved
    // identity in request extensions.
    let protected = Router::new()
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            gate::authenticate,
        ));

    Router::new()
        // Public endpoints
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .merge(protected)
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
