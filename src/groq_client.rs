use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use serde::{Deserialize, Serialize};

pub const SYSTEM_PROMPT: &str = "You are an expert sales and marketing assistant.";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 1024;

const GENERIC_UPSTREAM_ERROR: &str = "Groq API Failed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    message: Option<String>,
}

impl ChatCompletionRequest {
    /// Fixed system role plus the caller's prompt.
    pub fn for_prompt(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Client for the Groq (OpenAI-compatible) chat-completion API.
///
/// One request per call: no retries, no streaming, transport-default timeouts.
#[derive(Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.groq_base_url.clone(),
            config.groq_model.clone(),
            config.groq_api_key.clone(),
        )
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends `prompt` upstream and returns the first completion's text.
    ///
    /// Blank prompts and a missing credential fail before any request is made.
    pub async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        if prompt.trim().is_empty() {
            return Err(AppError::BadRequest("Prompt is required".to_string()));
        }
        let Some(ref api_key) = self.api_key else {
            return Err(AppError::ServerMisconfigured(
                "Server API Key not configured".to_string(),
            ));
        };

        let body = ChatCompletionRequest::for_prompt(&self.model, prompt);
        tracing::info!(
            "Requesting completion from {} (model {}, {} prompt chars)",
            self.base_url,
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("Groq request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<UpstreamErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .and_then(|d| d.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_UPSTREAM_ERROR.to_string());
            tracing::warn!("Groq returned {}: {}", status, message);
            return Err(AppError::UpstreamError(message));
        }

        let data: ChatCompletionResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} completion", self.model))?;

        let content = data
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::UpstreamError("Upstream returned no choices".to_string()))?;

        tracing::info!("✓ Completion received ({} chars)", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(ChatCompletionRequest::for_prompt(
            "llama-3.3-70b-versatile",
            "Write a slogan",
        ))
        .unwrap();

        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["max_tokens"], 1024);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Write a slogan");
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let client = GroqClient::new("https://example.com", "m", Some("  ".to_string()));
        assert!(!client.has_credential());
    }

    #[tokio::test]
    async fn test_validation_happens_before_network() {
        // Unroutable base URL: reaching the network would produce an UpstreamError
        let client = GroqClient::new("http://127.0.0.1:9", "m", Some("key".to_string()));
        assert!(matches!(
            client.generate("   ").await,
            Err(AppError::BadRequest(_))
        ));

        let client = GroqClient::new("http://127.0.0.1:9", "m", None);
        assert!(matches!(
            client.generate("hello").await,
            Err(AppError::ServerMisconfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_upstream_error() {
        let client = GroqClient::new("http://127.0.0.1:9", "m", Some("key".to_string()));
        let err = client.generate("hello").await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        match err {
            AppError::WithContext { source, context } => {
                assert_eq!(context, "Groq request failed");
                assert!(matches!(*source, AppError::UpstreamError(_)));
            }
            other => panic!("expected context error, got {:?}", other),
        }
    }
}
