pub mod error;
pub mod health;
pub mod puzzles;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use error::ApiError;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/puzzles/generate", post(puzzles::generate_puzzle))
        .route("/puzzles/check", post(puzzles::check_selection))
}
