use crate::handlers::{ask_handler, health_check};
use axum::{Router, routing::get};

/// Creates and configures all application routes
pub fn create_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/ask", get(ask_handler))
}
