use axum::{Extension, extract::Query, response::Json as ResponseJson};
use serde::Deserialize;
use tracing::{debug, info};

use crate::app::AppState;
use crate::models::{AskResponse, HealthResponse};

/// Health check handler
/// Returns the service status and health information
pub async fn health_check() -> ResponseJson<HealthResponse> {
    debug!("Health check endpoint called");
    ResponseJson(HealthResponse::ok())
}

/// Query parameters for the ask endpoint.
///
/// A missing `q` degrades to the empty question instead of a rejection; the
/// downstream pipeline already handles empty text.
#[derive(Debug, Deserialize)]
pub struct AskParams {
    #[serde(default)]
    pub q: String,
}

/// Ask handler: natural-language question in, actuator command out.
///
/// Every internal fault has already degraded to `no command` by the time the
/// source returns, so this handler always answers `200` with one of the three
/// command strings.
pub async fn ask_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<AskParams>,
) -> ResponseJson<AskResponse> {
    info!("Ask endpoint called with question: {}", params.q);

    let command = state.source.query(&params.q).await;

    // Read state, compute, write pin as one atomic unit under the lock.
    let state_after = {
        let mut actuator = state.actuator.lock().await;
        actuator.apply(command)
    };
    debug!("Actuator state after command: {:?}", state_after);

    ResponseJson(AskResponse::new(command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::{Actuator, ActuatorState, SoftPin};
    use crate::command::Command;
    use crate::gemini::CommandSource;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct FixedSource(Command);

    #[async_trait]
    impl CommandSource for FixedSource {
        async fn query(&self, _question: &str) -> Command {
            self.0
        }
    }

    fn state_with(command: Command) -> (AppState, SoftPin) {
        let pin = SoftPin::new(4);
        let state = AppState {
            source: Arc::new(FixedSource(command)),
            actuator: Arc::new(Mutex::new(Actuator::new(pin.clone()))),
        };
        (state, pin)
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await;
        assert_eq!(response.0.status, "ok");
    }

    #[tokio::test]
    async fn test_ask_handler_applies_command() {
        let (state, pin) = state_with(Command::TurnOn);

        let response = ask_handler(
            Extension(state.clone()),
            Query(AskParams {
                q: "lights please".to_string(),
            }),
        )
        .await;

        assert_eq!(response.0.answer, "turn on");
        assert!(pin.is_high());
        assert_eq!(state.actuator.lock().await.state(), ActuatorState::On);
    }

    #[tokio::test]
    async fn test_ask_handler_empty_question() {
        let (state, pin) = state_with(Command::NoCommand);

        let response = ask_handler(Extension(state), Query(AskParams { q: String::new() })).await;

        assert_eq!(response.0.answer, "no command");
        assert!(!pin.is_high());
    }
}
