//! Semantic search engine implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use noteseek_embeddings::{
    EmbeddingProvider, Notifier, SimilarityIndex, SimilarityResult, embed_or_empty,
};
use noteseek_vault::{Document, DocumentSource};

use crate::config::SearchConfig;
use crate::error::Result;

/// Whether the index has been built yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    /// No rebuild has completed.
    Empty,
    /// At least one rebuild has completed.
    Populated,
}

/// Outcome of a full rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildReport {
    /// Number of entries in the rebuilt index.
    pub indexed: usize,

    /// IDs stored with an empty embedding because the fetch failed.
    pub failed: Vec<String>,

    /// Time taken in milliseconds.
    pub duration_ms: u64,
}

/// Embeds notes and answers top-K similarity queries over them.
///
/// The index is rebuilt wholesale; there are no incremental updates.
/// Rebuilds are serialized, and a rebuild swaps its new index in only
/// once every document has been embedded, so searches see either the
/// old index or the new one.
#[derive(Clone)]
pub struct SemanticSearch {
    /// Source of embeddings.
    provider: Arc<dyn EmbeddingProvider>,

    /// Where failed embedding fetches are reported.
    notifier: Arc<dyn Notifier>,

    /// `None` until the first rebuild finishes.
    index: Arc<RwLock<Option<SimilarityIndex>>>,

    /// Held for the duration of a rebuild.
    rebuild_lock: Arc<Mutex<()>>,

    /// Limit used by [`SemanticSearch::search_default`].
    max_number_of_notes: NonZeroUsize,
}

impl SemanticSearch {
    /// Create an engine with the default result limit.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            provider,
            notifier,
            index: Arc::new(RwLock::new(None)),
            rebuild_lock: Arc::new(Mutex::new(())),
            max_number_of_notes: SearchConfig::new().max_number_of_notes,
        }
    }

    /// Create an engine talking to the Ollama server described by `config`.
    pub fn from_config(config: &SearchConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(Arc::new(config.provider()), notifier)
            .with_max_number_of_notes(config.max_number_of_notes)
    }

    /// Set the limit used by [`SemanticSearch::search_default`].
    pub fn with_max_number_of_notes(mut self, limit: NonZeroUsize) -> Self {
        self.max_number_of_notes = limit;
        self
    }

    /// Current state of the index.
    pub async fn state(&self) -> IndexState {
        if self.index.read().await.is_some() {
            IndexState::Populated
        } else {
            IndexState::Empty
        }
    }

    /// Number of indexed documents.
    pub async fn len(&self) -> usize {
        self.index.read().await.as_ref().map_or(0, SimilarityIndex::len)
    }

    /// Check if no documents are indexed.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Embed every document and replace the index with the result.
    ///
    /// Documents are embedded one at a time, in the order given. A failed
    /// fetch is reported through the notifier and the document is kept with
    /// an empty embedding, so it can never rank above a real match. When an
    /// ID appears more than once the last document wins.
    pub async fn rebuild_all(&self, documents: Vec<Document>) -> RebuildReport {
        let _rebuild = self.rebuild_lock.lock().await;
        let start = Instant::now();

        info!("Rebuilding index from {} documents", documents.len());

        let mut index = SimilarityIndex::new();
        for document in documents {
            let embedding = embed_or_empty(
                self.provider.as_ref(),
                self.notifier.as_ref(),
                &document.content,
            )
            .await;
            index.insert(document.id, embedding);
        }

        let failed: Vec<String> = index
            .ids()
            .filter(|id| index.get(id).is_some_and(Vec::is_empty))
            .map(str::to_string)
            .collect();
        let indexed = index.len();

        *self.index.write().await = Some(index);

        let duration = start.elapsed();
        info!(
            "Indexed {indexed} documents in {duration:?} (failed: {})",
            failed.len()
        );

        RebuildReport {
            indexed,
            failed,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Read all documents from `source` and rebuild the index from them.
    pub async fn rebuild_from(&self, source: &dyn DocumentSource) -> Result<RebuildReport> {
        let documents = source.documents().await?;
        Ok(self.rebuild_all(documents).await)
    }

    /// Find the `limit` documents most similar to `query`.
    ///
    /// Returns nothing before the first rebuild. If the query itself cannot
    /// be embedded, every document scores 0 and they come back in index order.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<SimilarityResult> {
        if self.state().await == IndexState::Empty {
            debug!("Search before first rebuild, returning no results");
            return Vec::new();
        }

        let query_embedding =
            embed_or_empty(self.provider.as_ref(), self.notifier.as_ref(), query).await;

        let results = match self.index.read().await.as_ref() {
            Some(index) => index.search(&query_embedding, limit),
            None => Vec::new(),
        };

        debug!("Search returned {} results (limit {limit})", results.len());
        results
    }

    /// [`SemanticSearch::search`] with the configured limit.
    pub async fn search_default(&self, query: &str) -> Vec<SimilarityResult> {
        self.search(query, self.max_number_of_notes.get()).await
    }
}
