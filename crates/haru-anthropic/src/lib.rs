// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter for the Haru service.
//!
//! Implements [`ProviderAdapter`] over the Anthropic Messages API: a single
//! prompt goes in as one user turn, and the concatenated text blocks of the
//! response come back as raw, untrusted model output.

pub mod client;
pub mod types;

use async_trait::async_trait;
use haru_config::HaruConfig;
use haru_core::{AdapterType, HaruError, HealthStatus, PluginAdapter, ProviderAdapter};
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest, ResponseContentBlock};

/// System prompt sent with every generation request.
///
/// Each pipeline prompt carries its own task instructions and output
/// contract; this only pins the assistant's overall register.
const SYSTEM_PROMPT: &str = "You are the AI engine of Haru, a Korean personal \
reflection journal and scheduling assistant. Follow the task instructions in \
the user message exactly, including the requested output format.";

/// Anthropic Claude provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicProvider {
    client: AnthropicClient,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider from the given configuration.
    pub fn new(config: &HaruConfig) -> Result<Self, HaruError> {
        let api_key = resolve_api_key(&config.anthropic.api_key)?;
        let client = AnthropicClient::new(
            api_key,
            config.anthropic.api_version.clone(),
            config.anthropic.default_model.clone(),
        )?;

        info!(
            model = config.anthropic.default_model,
            "Anthropic provider initialized"
        );

        Ok(Self {
            client,
            max_tokens: config.anthropic.max_tokens,
        })
    }

    /// Creates a provider with an existing client (for testing).
    pub fn with_client(client: AnthropicClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, HaruError> {
        // We avoid consuming tokens on health checks; a constructable client
        // with resolved credentials counts as healthy.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HaruError> {
        debug!("Anthropic provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    async fn generate(&self, prompt: &str) -> Result<String, HaruError> {
        let request = MessageRequest {
            model: self.client.default_model().to_string(),
            system: Some(SYSTEM_PROMPT.to_string()),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
        };

        let response = self.client.complete_message(&request).await?;

        let content = response
            .content
            .iter()
            .map(|block| match block {
                ResponseContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("");

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "generation complete"
        );

        Ok(content)
    }
}

/// Resolve the API key from config, falling back to `ANTHROPIC_API_KEY`.
fn resolve_api_key(configured: &Option<String>) -> Result<String, HaruError> {
    if let Some(key) = configured {
        if !key.trim().is_empty() {
            return Ok(key.clone());
        }
    }
    std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        HaruError::Config(
            "no Anthropic API key: set anthropic.api_key or ANTHROPIC_API_KEY".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server_uri: &str) -> AnthropicProvider {
        let client = AnthropicClient::new(
            "test-key".into(),
            "2023-06-01".into(),
            "claude-sonnet-4-20250514".into(),
        )
        .unwrap()
        .with_base_url(server_uri.to_string());
        AnthropicProvider::with_client(client, 2048)
    }

    #[test]
    fn configured_api_key_wins() {
        let key = resolve_api_key(&Some("sk-configured".into())).unwrap();
        assert_eq!(key, "sk-configured");
    }

    #[test]
    #[serial_test::serial]
    fn blank_configured_key_falls_back_to_env() {
        // SAFETY: test is serialized; no other thread touches the environment.
        unsafe {
            std::env::set_var("ANTHROPIC_API_KEY", "sk-env");
        }
        let key = resolve_api_key(&Some("   ".into())).unwrap();
        assert_eq!(key, "sk-env");
        unsafe {
            std::env::remove_var("ANTHROPIC_API_KEY");
        }
    }

    #[test]
    #[serial_test::serial]
    fn missing_key_everywhere_is_a_config_error() {
        unsafe {
            std::env::remove_var("ANTHROPIC_API_KEY");
        }
        let result = resolve_api_key(&None);
        assert!(matches!(result, Err(HaruError::Config(_))));
    }

    #[tokio::test]
    async fn generate_joins_text_blocks() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "{\"questions\": "},
                {"type": "text", "text": "[\"q1\"]}"}
            ],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 20, "output_tokens": 10}
        });
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri());
        let text = provider.generate("prompt").await.unwrap();
        assert_eq!(text, "{\"questions\": [\"q1\"]}");
    }

    #[tokio::test]
    async fn generate_sends_prompt_as_single_user_turn() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "ok"}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 1, "output_tokens": 1}
        });
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{"role": "user", "content": "오늘의 질문을 만들어줘"}],
                "max_tokens": 2048
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri());
        let result = provider.generate("오늘의 질문을 만들어줘").await;
        assert!(result.is_ok(), "request body should match: {result:?}");
    }
}
