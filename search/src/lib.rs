//! # Semantic Search
//!
//! Ties the vault and the embeddings together:
//!
//! - **Configuration**: Validated settings (server URL, model, result limit)
//! - **Rebuild**: Embed every note and replace the index
//! - **Search**: Embed a query and return the top-K notes by cosine similarity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use noteseek_embeddings::TracingNotifier;
//! use noteseek_search::{SearchConfig, SemanticSearch};
//! use noteseek_vault::{VaultConfig, VaultScanner};
//!
//! let config = SearchConfig::load("config.toml")?;
//! let engine = SemanticSearch::from_config(&config, Arc::new(TracingNotifier));
//!
//! engine.rebuild_from(&VaultScanner::new(VaultConfig::new("~/notes"))).await?;
//! let results = engine.search_default("what did I plant last spring?").await;
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{DEFAULT_MAX_NUMBER_OF_NOTES, SearchConfig, SearchSettings};
pub use engine::{IndexState, RebuildReport, SemanticSearch};
pub use error::{Result, SearchError};

// Re-export from dependencies for convenience
pub use noteseek_embeddings::{EmbeddingProvider, Notifier, SimilarityResult};
pub use noteseek_vault::{Document, DocumentSource};
