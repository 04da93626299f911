//! Supplementary external advice
//!
//! An advisor produces zero or one extra advice string for a text. The
//! shipped implementation asks an OpenAI-compatible chat-completions endpoint
//! for one free-form refactoring suggestion. Every failure is contained here:
//! the engine's output is never affected by a network problem, a bad
//! response, or a rejected credential.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const SYSTEM_PROMPT: &str = "You are a Ruby refactoring assistant. \
Given a snippet of Ruby code, reply with one concise refactoring suggestion \
as a single sentence. Reply with the suggestion only.";

/// Produce zero or one extra advice string for a text
///
/// Implementations must not block core analysis semantics: `advise` may take
/// time (it is allowed to do I/O) but must never panic or propagate errors.
pub trait Advisor {
    fn advise(&self, text: &str) -> Option<String>;
}

/// Explicit advisor configuration
///
/// The credential is passed in by the caller; the advisor itself never reads
/// the environment.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// API key for the completion service
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Chat-completions endpoint URL
    pub endpoint: String,

    /// Request timeout
    pub timeout: Duration,
}

impl AdvisorConfig {
    /// Create a configuration with default model, endpoint and timeout
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the model
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Override the endpoint (useful for proxies and tests)
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Error)]
enum AdvisorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {0}")]
    Status(reqwest::StatusCode),

    #[error("empty completion")]
    EmptyCompletion,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Advisor backed by an OpenAI-compatible chat-completions service
pub struct OpenAiAdvisor {
    config: AdvisorConfig,
}

impl OpenAiAdvisor {
    /// Create an advisor from an explicit configuration
    pub fn new(config: AdvisorConfig) -> Self {
        Self { config }
    }

    fn request(&self, text: &str) -> Result<String, AdvisorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": text },
            ],
        });

        let response = client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status));
        }

        let payload: ChatResponse = response.json()?;
        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        let content = content.trim();
        if content.is_empty() {
            return Err(AdvisorError::EmptyCompletion);
        }

        Ok(content.to_string())
    }
}

impl Advisor for OpenAiAdvisor {
    /// Ask the service for one suggestion; any failure is logged and skipped
    fn advise(&self, text: &str) -> Option<String> {
        match self.request(text) {
            Ok(advice) => Some(advice),
            Err(e) => {
                log::warn!("external advisor skipped: {}", e);
                None
            }
        }
    }
}
