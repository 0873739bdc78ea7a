// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding adapter backed by the OpenAI embeddings endpoint.

use async_trait::async_trait;
use memoria_config::OpenAiConfig;
use memoria_core::{
    AdapterType, EmbeddingAdapter, EmbeddingInput, EmbeddingOutput, HealthStatus, MemoriaError,
    PluginAdapter,
};
use tracing::{debug, warn};

use crate::client::OpenAiClient;
use crate::types::{EmbeddingsRequest, EmbeddingsResponse};

/// Remote embedding gateway speaking the OpenAI embeddings protocol.
pub struct OpenAiEmbedder {
    client: OpenAiClient,
    model: String,
    dimensions: usize,
    max_input_chars: usize,
}

impl OpenAiEmbedder {
    /// Build an embedder from configuration, sharing the given HTTP client.
    pub fn new(client: OpenAiClient, config: &OpenAiConfig) -> Self {
        Self {
            client,
            model: config.embedding_model.clone(),
            dimensions: config.embedding_dimensions,
            max_input_chars: config.max_embed_chars,
        }
    }

    /// Truncate a text to the model's input budget, on a char boundary.
    fn clamp_input(&self, text: &str) -> String {
        if text.chars().count() <= self.max_input_chars {
            return text.to_string();
        }
        warn!(
            max_chars = self.max_input_chars,
            "embedding input exceeds limit, truncating"
        );
        text.chars().take(self.max_input_chars).collect()
    }
}

#[async_trait]
impl PluginAdapter for OpenAiEmbedder {
    fn name(&self) -> &str {
        "openai-embeddings"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(1, 0, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, MemoriaError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MemoriaError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for OpenAiEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, MemoriaError> {
        if input.texts.is_empty() || input.texts.iter().all(|t| t.trim().is_empty()) {
            return Err(MemoriaError::Embedding {
                message: "cannot embed empty input".to_string(),
                source: None,
            });
        }

        let request = EmbeddingsRequest {
            model: self.model.clone(),
            input: input.texts.iter().map(|t| self.clamp_input(t)).collect(),
            dimensions: Some(self.dimensions),
        };

        let response: EmbeddingsResponse = self.client.post_json("/embeddings", &request).await?;
        debug!(model = %response.model, count = response.data.len(), "embeddings received");

        if response.data.len() != input.texts.len() {
            return Err(MemoriaError::Embedding {
                message: format!(
                    "expected {} embeddings, got {}",
                    input.texts.len(),
                    response.data.len()
                ),
                source: None,
            });
        }

        // The API may return entries out of order; restore input order.
        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        for item in &data {
            if item.embedding.len() != self.dimensions {
                return Err(MemoriaError::Embedding {
                    message: format!(
                        "expected {}-dimensional vectors, got {}",
                        self.dimensions,
                        item.embedding.len()
                    ),
                    source: None,
                });
            }
        }

        Ok(EmbeddingOutput {
            embeddings: data.into_iter().map(|d| d.embedding).collect(),
            dimensions: self.dimensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> OpenAiConfig {
        OpenAiConfig {
            embedding_dimensions: 3,
            max_embed_chars: 20,
            ..OpenAiConfig::default()
        }
    }

    fn test_embedder(base_url: &str) -> OpenAiEmbedder {
        let client = OpenAiClient::new("test-key", base_url, Duration::from_secs(5)).unwrap();
        OpenAiEmbedder::new(client, &test_config())
    }

    #[tokio::test]
    async fn embed_restores_input_order() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "data": [
                {"index": 1, "embedding": [0.4, 0.5, 0.6]},
                {"index": 0, "embedding": [0.1, 0.2, 0.3]}
            ],
            "model": "text-embedding-3-small"
        });

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let embedder = test_embedder(&server.uri());
        let output = embedder
            .embed(EmbeddingInput {
                texts: vec!["첫 번째".into(), "두 번째".into()],
            })
            .await
            .unwrap();

        assert_eq!(output.embeddings[0], vec![0.1, 0.2, 0.3]);
        assert_eq!(output.embeddings[1], vec![0.4, 0.5, 0.6]);
        assert_eq!(output.dimensions, 3);
    }

    #[tokio::test]
    async fn embed_rejects_empty_input() {
        let server = MockServer::start().await;
        let embedder = test_embedder(&server.uri());

        let err = embedder
            .embed(EmbeddingInput { texts: vec![] })
            .await
            .unwrap_err();
        assert!(matches!(err, MemoriaError::Embedding { .. }));

        let err = embedder
            .embed(EmbeddingInput {
                texts: vec!["   ".into()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MemoriaError::Embedding { .. }));
    }

    #[tokio::test]
    async fn embed_rejects_dimension_mismatch() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "data": [{"index": 0, "embedding": [0.1, 0.2]}],
            "model": "text-embedding-3-small"
        });

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let embedder = test_embedder(&server.uri());
        let err = embedder
            .embed(EmbeddingInput {
                texts: vec!["hello".into()],
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("3-dimensional"), "got: {err}");
    }

    #[test]
    fn clamp_input_truncates_on_char_boundary() {
        let client = OpenAiClient::new("k", "http://localhost", Duration::from_secs(1)).unwrap();
        let embedder = OpenAiEmbedder::new(client, &test_config());
        let long = "가".repeat(30);
        let clamped = embedder.clamp_input(&long);
        assert_eq!(clamped.chars().count(), 20);
    }
}
