use thiserror::Error;

/// Faults that can occur between an inbound question and a parsed command.
///
/// Every variant is absorbed at the Gemini client boundary and mapped to
/// [`Command::NoCommand`](crate::command::Command::NoCommand); none of them
/// surface as an HTTP error. They exist so the log can still say *why* the
/// actuator did not move.
#[derive(Debug, Error)]
pub enum QueryFault {
    /// The request never completed (connection failure or timeout).
    #[error("request to model endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("model endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body parsed, but carries no candidate reply text.
    #[error("response carries no reply text")]
    MissingReply,
}
