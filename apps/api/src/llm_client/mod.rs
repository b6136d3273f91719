/// LLM Client — the single point of entry for completion-service calls.
///
/// ARCHITECTURAL RULE: no other module may talk to the completion endpoint
/// directly. The extraction pipeline goes through `LlmClient::complete`.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Near-deterministic sampling for structured extraction.
const TEMPERATURE: f64 = 0.1;
/// Hard ceiling on completion output.
const MAX_TOKENS: u32 = 2500;
const TOP_P: f64 = 1.0;

/// Every variant means the same thing to the caller: the completion service
/// is unavailable for this request and the fallback extractor applies.
/// No variant is retried — one failed attempt ends the LLM path.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion contained no message content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response-format hint asking the endpoint for a bare JSON object.
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Wraps the OpenAI chat-completions API for structured extraction calls.
///
/// Endpoint URL, model id, credential and timeout are all threaded in from
/// `Config` at construction so tests can inject stub endpoints.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.llm_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: config.openai_api_key.clone(),
            api_url: config.openai_api_url.clone(),
            model: config.openai_model.clone(),
        }
    }

    /// Issues a single completion request and returns the raw message text.
    ///
    /// Exactly one attempt is made: a failed call routes the caller to the
    /// rule-based fallback instead of retrying, keeping request latency
    /// bounded by the one configured timeout. With no credential configured
    /// the call short-circuits before touching the network.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(LlmError::MissingCredential);
        };

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatResponse = response.json().await?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!(chars = text.len(), "Completion received");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_shape() {
        let request = ChatRequest {
            model: "gpt-4.1-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4.1-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hello");
        assert_eq!(value["temperature"], 0.1);
        assert_eq!(value["max_tokens"], 2500);
        assert_eq!(value["top_p"], 1.0);
        assert_eq!(value["stream"], false);
        assert_eq!(value["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_chat_response_parses_missing_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        // The URL is unreachable on purpose: without a credential the client
        // must not attempt a network call at all.
        let config = crate::config::Config::for_tests("http://127.0.0.1:1/nowhere", None);
        let client = LlmClient::new(&config);

        let result = client.complete("prompt", "system").await;
        assert!(matches!(result, Err(LlmError::MissingCredential)));
    }
}
