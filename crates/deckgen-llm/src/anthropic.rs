//! Anthropic (Claude) messages API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use deckgen_core::error::{DeckgenError, DeckgenResult};
use deckgen_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat, TokenUsage};
use deckgen_core::types::{Message, MessageRole};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const JSON_INSTRUCTION: &str = "Respond with a single JSON object and nothing else.";

/// Anthropic chat model.
pub struct AnthropicLlm {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

impl AnthropicLlm {
    /// Create a client; the key must be present in `config`.
    pub fn new(config: LlmConfig) -> DeckgenResult<Self> {
        let api_key = config
            .api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
            .ok_or_else(|| DeckgenError::config("Anthropic API key not found in provider config"))?;

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| DeckgenError::config("Invalid API key format"))?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| DeckgenError::config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(ANTHROPIC_API_URL)
            .trim_end_matches('/')
            .to_string();

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_MODEL.to_string();
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn build_request(&self, messages: &[Message], options: GenerationOptions) -> AnthropicRequest {
        let mut system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();
        if options.response_format == Some(ResponseFormat::Json) {
            system.push(JSON_INSTRUCTION);
        }

        let messages = messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| AnthropicMessage {
                role: m.role.as_str(),
                content: m.content.clone(),
            })
            .collect();

        AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: Some(options.temperature.unwrap_or(self.config.temperature)),
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            messages,
        }
    }
}

#[async_trait]
impl Llm for AnthropicLlm {
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> DeckgenResult<LlmResponse> {
        let request = self.build_request(messages, options.unwrap_or_default());

        debug!(model = %self.config.model, messages = request.messages.len(), "Anthropic messages request");
        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DeckgenError::upstream_with_source(format!("Anthropic API request failed: {}", e), e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DeckgenError::upstream_with_source(format!("Failed to read response body: {}", e), e)
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(DeckgenError::upstream(format!(
                "Anthropic API error ({}): {}",
                status, message
            )));
        }

        let response: AnthropicResponse = serde_json::from_str(&body)
            .map_err(|e| DeckgenError::invalid_response(format!("Failed to parse response: {}", e)))?;

        let content = response
            .content
            .into_iter()
            .find(|c| c.content_type == "text")
            .and_then(|c| c.text);

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens + u.output_tokens,
        });

        Ok(LlmResponse { content, usage })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn supports_json_mode(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen_core::error::{ErrorCode, ErrorKind};
    use mockito::Matcher;
    use secrecy::SecretString;

    fn llm(base_url: String) -> AnthropicLlm {
        AnthropicLlm::new(LlmConfig {
            model: "claude-sonnet-4-5".to_string(),
            api_key: Some(SecretString::new("ak-test".to_string())),
            base_url: Some(base_url),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_system_messages_are_lifted() {
        let llm = llm("http://localhost".to_string());
        let request = llm.build_request(
            &[Message::system("You parse resumes."), Message::user("text")],
            GenerationOptions::json(),
        );

        let system = request.system.unwrap();
        assert!(system.starts_with("You parse resumes."));
        assert!(system.ends_with(JSON_INSTRUCTION));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = AnthropicLlm::new(LlmConfig::default()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages")
            .match_header("x-api-key", "ak-test")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .match_body(Matcher::PartialJson(serde_json::json!({"model": "claude-sonnet-4-5"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"content": [{"type": "text", "text": "{\"full_name\": \"A. Dupont\"}"}], "usage": {"input_tokens": 10, "output_tokens": 4}}"#,
            )
            .create_async()
            .await;

        let response = llm(server.url())
            .generate(&[Message::user("hi")], None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.content_or_empty(), r#"{"full_name": "A. Dupont"}"#);
        assert_eq!(response.usage.unwrap().total_tokens, 14);
    }

    #[tokio::test]
    async fn test_http_error_is_upstream() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/messages")
            .with_status(529)
            .with_body(r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#)
            .create_async()
            .await;

        let err = llm(server.url())
            .generate(&[Message::user("hi")], None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UpsProviderFailed);
        assert!(err.message().contains("Overloaded"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/messages")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = llm(server.url())
            .generate(&[Message::user("hi")], None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UpsInvalidResponse);
    }
}
