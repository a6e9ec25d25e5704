//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Reasons an embedding request can fail.
///
/// Callers that want the "never fails" behavior go through
/// [`crate::embed_or_empty`], which turns any of these into a notice.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// No embedding model has been configured.
    #[error("no embedding model configured")]
    NotConfigured,

    /// The request never produced a response (connection refused, DNS, body read).
    #[error("request to embedding service failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("embedding service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON shape we expect.
    #[error("malformed embedding response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The body parsed but carried no usable vector.
    #[error("embedding response did not contain a non-empty `embedding` array")]
    MissingEmbedding,
}
