use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer,
};

use crate::handlers::{self, AppState};

/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the full application router.
///
/// API routes live under `/api`; anything else falls through to static files
/// in the configured public directory.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut api_routes = Router::new()
        .route("/api/generate", post(handlers::generate))
        .route(
            "/api/leads",
            get(handlers::list_leads).post(handlers::create_lead),
        )
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login));

    if state.config.debug_env_enabled {
        api_routes = api_routes.route("/api/debug-env", get(handlers::debug_env));
    } else {
        tracing::info!("/api/debug-env disabled");
    }

    let api_routes = api_routes.layer(
        ServiceBuilder::new()
            // Request size limit: 1MB max payload
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
    );

    let static_files = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
