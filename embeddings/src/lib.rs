//! # Embeddings
//!
//! This crate turns note text into dense vectors and ranks stored vectors
//! against a query by cosine similarity.
//!
//! ## Features
//!
//! - **Embedding Generation**: Fetch vectors from a local Ollama server
//! - **Soft Failure**: Failed fetches become a user notice and an empty vector
//! - **Similarity Search**: Top-K ranking over an in-memory index
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► SimilarityIndex           │
//! │       │                                   │                     │
//! │       ▼                                   ▼                     │
//! │  OllamaProvider ──► Notifier       cosine_similarity           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod index;
pub mod notify;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use index::SimilarityIndex;
pub use notify::{Notifier, TracingNotifier};
pub use provider::{DEFAULT_OLLAMA_URL, EmbeddingProvider, OllamaProvider, embed_or_empty};
pub use similarity::{SimilarityResult, cosine_similarity, rank_top_k};

/// A dense vector embedding.
///
/// Dimensionality is whatever the model returns; nothing validates it.
pub type Embedding = Vec<f32>;
