use std::sync::Arc;
use std::time::Duration;

use axum::{Extension, Router};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::actuator::{Actuator, SoftPin};
use crate::config::Config;
use crate::gemini::{CommandSource, GeminiClient};
use crate::routes::create_routes;

/// Shared per-process state: the command source and the single actuator.
///
/// The actuator sits behind a mutex so concurrent requests cannot interleave
/// pin writes; the command source is immutable and shared freely.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CommandSource>,
    pub actuator: Arc<Mutex<Actuator<SoftPin>>>,
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rs_ask_svc=info,tower_http=debug,axum::rejection=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    let api_key =
        std::env::var("GEMINI_API_KEY").map_err(|_| anyhow::anyhow!("GEMINI_API_KEY not set"))?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;
    let source = GeminiClient::new(http, api_key, config);

    let actuator = Actuator::new(SoftPin::new(config.actuator_pin));
    info!(
        "Actuator initialized on pin {}, output LOW",
        config.actuator_pin
    );

    let state = AppState {
        source: Arc::new(source),
        actuator: Arc::new(Mutex::new(actuator)),
    };

    Ok(build_router(state))
}

/// Assembles the router around an existing state (tests inject mocks here).
pub fn build_router(state: AppState) -> Router {
    create_routes()
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}
