use anyhow::{Context, Result};

/// Default completion endpoint. Override with OPENAI_API_URL (tests point
/// this at a local stub).
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default to a fast JSON-capable model; override with OPENAI_MODEL.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Application configuration loaded once from environment variables.
///
/// The completion credential is deliberately optional: without it the
/// extraction pipeline short-circuits to the rule-based fallback instead
/// of failing at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub openai_model: String,
    /// Whole-call timeout for one completion request, in seconds.
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5002".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    /// A config pointed at `api_url`, for tests with stub endpoints.
    pub fn for_tests(api_url: &str, api_key: Option<&str>) -> Self {
        Config {
            openai_api_key: api_key.map(String::from),
            openai_api_url: api_url.to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            llm_timeout_secs: 5,
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}
