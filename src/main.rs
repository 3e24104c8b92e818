mod config;
mod game;
mod models;
mod routes;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::Config;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_search_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word search backend...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded (grid sizes {}..={}, default {})",
        config.generator.min_grid_size,
        config.generator.max_grid_size,
        config.generator.default_grid_size
    );

    let addr = config.server_addr();
    let state = Arc::new(AppState { config });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Generate endpoint: http://{}/api/puzzles/generate", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
