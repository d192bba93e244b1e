//! Remote query client for the Gemini `generateContent` REST endpoint.
//!
//! One question yields exactly one outbound request. Every fault is logged
//! and degrades to [`Command::NoCommand`], so a network hiccup can never
//! leave the actuator in an undefined state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::Config;
use crate::error::QueryFault;
use crate::prompt::build_prompt;

/// Anything that can turn a question into an actuator command.
///
/// The production implementation is [`GeminiClient`]; tests substitute a
/// canned source behind the same trait.
#[async_trait]
pub trait CommandSource: Send + Sync {
    async fn query(&self, question: &str) -> Command;
}

/// Client for the Gemini `generateContent` endpoint.
///
/// Built once at startup and immutable afterwards; the API key travels in the
/// target URL, so it is redacted before the URL is ever logged.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: String, config: &Config) -> Self {
        Self {
            http,
            api_key,
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Single attempt, no retries. Faults propagate to [`CommandSource::query`],
    /// which absorbs them.
    async fn try_query(&self, question: &str) -> Result<Command, QueryFault> {
        let request =
            GenerateContentRequest::single_turn(build_prompt(question), self.max_output_tokens);

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        debug!(
            "Posting generateContent request to {}",
            url.replace(&self.api_key, "***API_KEY***")
        );

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryFault::Status(status));
        }

        let body = response.text().await?;
        Ok(extract_command(&body))
    }
}

#[async_trait]
impl CommandSource for GeminiClient {
    async fn query(&self, question: &str) -> Command {
        match self.try_query(question).await {
            Ok(command) => command,
            Err(fault) => {
                warn!("Gemini query degraded to no command: {}", fault);
                Command::NoCommand
            }
        }
    }
}

/// Extracts the command from a raw `generateContent` response body.
///
/// Reads `candidates[0].content.parts[0].text`, then normalizes it through
/// [`Command::parse`]. Malformed JSON and an absent field path both degrade
/// to [`Command::NoCommand`]; the fault is logged, never propagated.
pub fn extract_command(body: &str) -> Command {
    match extract_reply(body) {
        Ok(text) => {
            let command = Command::parse(&text);
            info!("Gemini returned: {}", command);
            command
        }
        Err(fault) => {
            warn!("Discarding Gemini reply: {}", fault);
            Command::NoCommand
        }
    }
}

fn extract_reply(body: &str) -> Result<String, QueryFault> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or(QueryFault::MissingReply)
}

// -- wire types for the generateContent endpoint

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn single_turn(prompt: String, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig { max_output_tokens },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{"candidates":[{"content":{"parts":[{"text":" Turn On "}]}}]}"#;

    #[test]
    fn test_extract_normalizes_case_and_padding() {
        assert_eq!(extract_command(WELL_FORMED), Command::TurnOn);
    }

    #[test]
    fn test_extract_is_idempotent() {
        assert_eq!(extract_command(WELL_FORMED), extract_command(WELL_FORMED));
    }

    #[test]
    fn test_extract_requires_exact_match() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"please turn it on"}]}}]}"#;
        assert_eq!(extract_command(body), Command::NoCommand);
    }

    #[test]
    fn test_extract_survives_malformed_json() {
        assert_eq!(extract_command("{not json"), Command::NoCommand);
    }

    #[test]
    fn test_extract_treats_missing_path_as_no_command() {
        assert_eq!(extract_command("{}"), Command::NoCommand);
        assert_eq!(extract_command(r#"{"candidates":[]}"#), Command::NoCommand);
        assert_eq!(
            extract_command(r#"{"candidates":[{"content":{"parts":[]}}]}"#),
            Command::NoCommand
        );
        assert_eq!(
            extract_command(r#"{"candidates":[{}]}"#),
            Command::NoCommand
        );
    }

    #[test]
    fn test_request_payload_shape() {
        let request = GenerateContentRequest::single_turn("do it".to_string(), 100);
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "do it");
        assert_eq!(payload["generationConfig"]["maxOutputTokens"], 100);
    }

    #[tokio::test]
    async fn test_query_degrades_to_no_command_when_unreachable() {
        // Port 9 (discard) is not listening; the connection is refused.
        let mut config = Config::from_env();
        config.gemini_base_url = "http://127.0.0.1:9".to_string();

        let client = GeminiClient::new(reqwest::Client::new(), "test-key".to_string(), &config);
        assert_eq!(client.query("turn on the light").await, Command::NoCommand);
    }
}
