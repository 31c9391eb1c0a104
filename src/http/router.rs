//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/routines/generate", post(handlers::generate_routine))
        .route(
            "/routines/{id}",
            get(handlers::get_run).delete(handlers::delete_run),
        )
        .route(
            "/routines/semester-offering/{semester_offering_id}",
            get(handlers::list_runs_for_offering),
        )
        .route("/routines/{id}/commit", post(handlers::commit_run))
        .route("/routines/{id}/cancel", post(handlers::cancel_run));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
