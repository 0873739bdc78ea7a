// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-generation adapter backed by the OpenAI chat completions endpoint.

use async_trait::async_trait;
use memoria_config::OpenAiConfig;
use memoria_core::{AdapterType, GenerationAdapter, HealthStatus, MemoriaError, PluginAdapter};
use tracing::debug;

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Remote text-generation provider speaking the OpenAI chat protocol.
pub struct OpenAiGenerator {
    client: OpenAiClient,
    model: String,
}

impl OpenAiGenerator {
    /// Build a generator from configuration, sharing the given HTTP client.
    pub fn new(client: OpenAiClient, config: &OpenAiConfig) -> Self {
        Self {
            client,
            model: config.generation_model.clone(),
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai-chat"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(1, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, MemoriaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MemoriaError> {
        Ok(())
    }
}

#[async_trait]
impl GenerationAdapter for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, MemoriaError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response: ChatResponse = self.client.post_json("/chat/completions", &request).await?;
        debug!(choices = response.choices.len(), "completion received");

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| MemoriaError::Provider {
                message: "completion response contained no choices".to_string(),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_generator(base_url: &str) -> OpenAiGenerator {
        let client = OpenAiClient::new("test-key", base_url, Duration::from_secs(5)).unwrap();
        OpenAiGenerator::new(client, &OpenAiConfig::default())
    }

    #[tokio::test]
    async fn generate_returns_first_choice() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "그날의 이야기"}}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let generator = test_generator(&server.uri());
        let text = generator.generate("이야기를 들려줘").await.unwrap();
        assert_eq!(text, "그날의 이야기");
    }

    #[tokio::test]
    async fn generate_errors_on_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let generator = test_generator(&server.uri());
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, MemoriaError::Provider { .. }));
    }
}
