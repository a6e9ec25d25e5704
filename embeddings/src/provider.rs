//! Embedding providers.
//!
//! The only remote backend is Ollama's `/api/embeddings` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::notify::Notifier;

/// Where a stock Ollama install listens.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// The model embeddings are requested from, if one is configured.
    fn model(&self) -> Option<&str>;

    /// Generate an embedding for the given text.
    ///
    /// One attempt, no retry. The text is sent as-is.
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// Embed `text`, turning any failure into a notice and an empty vector.
pub async fn embed_or_empty(
    provider: &dyn EmbeddingProvider,
    notifier: &dyn Notifier,
    text: &str,
) -> Embedding {
    match provider.embed(text).await {
        Ok(embedding) => embedding,
        Err(err) => {
            notifier.notify(&format!(
                "Failed to get embedding from {}: {err}",
                provider.name()
            ));
            Vec::new()
        }
    }
}

/// Request body for `/api/embeddings`.
#[derive(Debug, Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

/// Ollama embedding provider.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model to request embeddings from.
    model: Option<String>,
}

impl OllamaProvider {
    /// Create a provider pointed at the default local server with no model.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            client: reqwest::Client::new(),
            model: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the embedding model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Reuse an existing HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embeddings", self.base_url.trim_end_matches('/'))
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        let model = self.model.as_deref().ok_or(EmbeddingError::NotConfigured)?;

        debug!("Requesting embedding with model {model} ({} bytes)", text.len());

        let response = self
            .client
            .post(self.endpoint())
            .json(&OllamaEmbeddingRequest {
                model,
                prompt: text,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaEmbeddingResponse = serde_json::from_str(&body)?;
        match parsed.embedding {
            Some(embedding) if !embedding.is_empty() => {
                debug!("Received embedding with {} dimensions", embedding.len());
                Ok(embedding)
            }
            _ => Err(EmbeddingError::MissingEmbedding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }
    }

    async fn server_answering(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_embed_sends_model_and_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .and(body_json(json!({
                "model": "nomic-embed-text",
                "prompt": "# Groceries\n- eggs"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "embedding": [0.5, -1.0, 2.0] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = OllamaProvider::new()
            .with_base_url(format!("{}/", server.uri()))
            .with_model("nomic-embed-text");

        let embedding = provider.embed("# Groceries\n- eggs").await.unwrap();
        assert_eq!(embedding, vec![0.5, -1.0, 2.0]);
    }

    #[tokio::test]
    async fn test_missing_model_is_not_configured() {
        let provider = OllamaProvider::new().with_base_url("http://127.0.0.1:1");
        let err = provider.embed("anything").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::NotConfigured));
    }

    #[tokio::test]
    async fn test_error_status() {
        let server =
            server_answering(ResponseTemplate::new(404).set_body_string("model not found")).await;
        let provider = OllamaProvider::new()
            .with_base_url(server.uri())
            .with_model("missing");

        match provider.embed("text").await.unwrap_err() {
            EmbeddingError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "model not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = server_answering(ResponseTemplate::new(200).set_body_string("not json")).await;
        let provider = OllamaProvider::new()
            .with_base_url(server.uri())
            .with_model("m");

        let err = provider.embed("text").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_non_numeric_embedding_is_malformed() {
        let server = server_answering(
            ResponseTemplate::new(200).set_body_json(json!({ "embedding": ["a", "b"] })),
        )
        .await;
        let provider = OllamaProvider::new()
            .with_base_url(server.uri())
            .with_model("m");

        let err = provider.embed("text").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_or_empty_embedding() {
        for body in [json!({ "error": "oops" }), json!({ "embedding": [] })] {
            let server = server_answering(ResponseTemplate::new(200).set_body_json(body)).await;
            let provider = OllamaProvider::new()
                .with_base_url(server.uri())
                .with_model("m");

            let err = provider.embed("text").await.unwrap_err();
            assert!(matches!(err, EmbeddingError::MissingEmbedding));
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let provider = OllamaProvider::new()
            .with_base_url("http://127.0.0.1:1")
            .with_model("m");

        let err = provider.embed("text").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Transport(_)));
    }

    #[tokio::test]
    async fn test_embed_or_empty_notifies_once_on_failure() {
        let server = server_answering(ResponseTemplate::new(500)).await;
        let provider = OllamaProvider::new()
            .with_base_url(server.uri())
            .with_model("m");
        let notifier = RecordingNotifier::default();

        let embedding = embed_or_empty(&provider, &notifier, "text").await;

        assert!(embedding.is_empty());
        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("ollama"));
    }

    #[tokio::test]
    async fn test_embed_or_empty_is_silent_on_success() {
        let server = server_answering(
            ResponseTemplate::new(200).set_body_json(json!({ "embedding": [1.0] })),
        )
        .await;
        let provider = OllamaProvider::new()
            .with_base_url(server.uri())
            .with_model("m");
        let notifier = RecordingNotifier::default();

        let embedding = embed_or_empty(&provider, &notifier, "").await;

        assert_eq!(embedding, vec![1.0]);
        assert!(notifier.notices.lock().unwrap().is_empty());
    }
}
