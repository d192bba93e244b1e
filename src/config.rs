use std::env;

/// Application configuration, read once at startup and immutable afterwards.
///
/// The Gemini API key is deliberately not part of this struct: it is a secret
/// and is read separately during app construction, so the config can be
/// logged wholesale.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub max_output_tokens: u32,
    pub request_timeout_secs: u64,
    pub actuator_pin: u8,
}

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            log_level: env::var("RUST_LOG")
                .unwrap_or_else(|_| "rs_ask_svc=info,tower_http=debug".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            max_output_tokens: env::var("GEMINI_MAX_OUTPUT_TOKENS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("GEMINI_MAX_OUTPUT_TOKENS must be a valid number"),
            request_timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("GEMINI_TIMEOUT_SECS must be a valid number"),
            actuator_pin: env::var("ACTUATOR_PIN")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .expect("ACTUATOR_PIN must be a valid pin number"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
