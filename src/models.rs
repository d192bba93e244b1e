use serde::Serialize;

use crate::command::Command;

/// Response payload for the ask endpoint
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

impl AskResponse {
    pub fn new(command: Command) -> Self {
        Self {
            answer: command.as_str().to_string(),
        }
    }
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}
