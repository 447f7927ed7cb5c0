//! Thin adapter over an OpenAI-compatible chat-completion endpoint.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Per-call model parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
}

impl CallParams {
    /// Parameters for question generation. High temperature for variety.
    #[must_use]
    pub fn question_generation() -> Self {
        Self {
            temperature: 1.1,
            max_tokens: 2048,
            top_p: Some(0.95),
        }
    }

    /// Parameters for topic suggestion.
    #[must_use]
    pub fn topic_suggestion() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 300,
            top_p: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl CompletionConfig {
    /// Reads provider settings from the environment. Returns `None` when
    /// `QUIZ_AI_API_KEY` is absent or blank, which marks the provider as
    /// unconfigured rather than broken.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("QUIZ_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("QUIZ_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("QUIZ_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Contract with the external text-completion provider.
///
/// Every call is a fallible, potentially slow remote call with no internal
/// timeout or cancellation; callers own that policy.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Whether a credential is present. When false, `complete` fails with
    /// `CompletionError::Unconfigured` without touching the network.
    fn is_configured(&self) -> bool;

    /// Run one completion and return the raw response text.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError` when unconfigured, on transport failure,
    /// on a non-success status, or when the response carries no content.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: CallParams,
    ) -> Result<String, CompletionError>;
}

/// reqwest-backed provider speaking the OpenAI chat-completions shape.
#[derive(Clone)]
pub struct HttpCompletionProvider {
    client: Client,
    config: Option<CompletionConfig>,
}

impl HttpCompletionProvider {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(CompletionConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<CompletionConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CompletionProvider for HttpCompletionProvider {
    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: CallParams,
    ) -> Result<String, CompletionError> {
        let config = self.config.as_ref().ok_or(CompletionError::Unconfigured)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_owned(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_owned(),
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CompletionError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)?;

        Ok(content.trim().to_owned())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_params_presets() {
        let q = CallParams::question_generation();
        assert_eq!(q.temperature, 1.1);
        assert_eq!(q.max_tokens, 2048);
        assert_eq!(q.top_p, Some(0.95));

        let s = CallParams::topic_suggestion();
        assert_eq!(s.temperature, 0.7);
        assert_eq!(s.max_tokens, 300);
        assert_eq!(s.top_p, None);
    }

    #[tokio::test]
    async fn unconfigured_provider_short_circuits() {
        let provider = HttpCompletionProvider::new(None);
        assert!(!provider.is_configured());
        let err = provider
            .complete("system", "user", CallParams::topic_suggestion())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Unconfigured));
    }

    #[test]
    fn request_serializes_without_absent_top_p() {
        let request = ChatRequest {
            model: "m".into(),
            messages: vec![],
            temperature: 0.7,
            max_tokens: 300,
            top_p: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("top_p"));
    }
}
