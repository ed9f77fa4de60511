//! API Routes
//!
//! Configures the Axum router with all record cache endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, health_handler, ingest_handler, lookup_handler, snapshot_handler,
    stats_handler, sweep_handler, upsert_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/records", put(upsert_handler).get(snapshot_handler))
        .route("/records/batch", post(ingest_handler))
        .route(
            "/records/:name/:record_type",
            get(lookup_handler).delete(delete_handler),
        )
        .route("/sweep", post(sweep_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
