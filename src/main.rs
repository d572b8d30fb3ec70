use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_ai_suite::config::Config;
use market_ai_suite::api::handlers::AppState;
use market_ai_suite::api::routes::build_router;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, wires the file-backed stores and
/// the Groq client into the application state, then serves forever.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_ai_suite=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");
    tracing::info!(
        "Lead store: {}, user store: {}",
        config.leads_file().display(),
        config.users_file().display()
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let app_state = Arc::new(AppState::from_config(config));
    let app = build_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://localhost:{}", listener.local_addr()?.port());

    axum::serve(listener, app).await?;

    Ok(())
}
