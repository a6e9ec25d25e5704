//! Similarity index for embedding lookups.

use indexmap::IndexMap;
use tracing::debug;

use crate::Embedding;
use crate::similarity::{SimilarityResult, rank_top_k};

/// In-memory map from document ID to embedding.
///
/// Entries keep the order they were first inserted in, which is also the
/// tie-break order for equal scores. Vectors are stored as given: a
/// zero-length vector is a valid entry that scores 0 against everything.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    entries: IndexMap<String, Embedding>,
}

impl SimilarityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an embedding, replacing any previous one for the same ID.
    ///
    /// Returns the replaced embedding, if there was one.
    pub fn insert(&mut self, id: impl Into<String>, embedding: Embedding) -> Option<Embedding> {
        let id = id.into();
        debug!("Indexing {id} ({} dimensions)", embedding.len());
        self.entries.insert(id, embedding)
    }

    /// Get an embedding by ID.
    pub fn get(&self, id: &str) -> Option<&Embedding> {
        self.entries.get(id)
    }

    /// Check if an ID exists in the index.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Get the number of entries in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All IDs, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Rank every entry against `query` and return the best `limit`.
    pub fn search(&self, query: &[f32], limit: usize) -> Vec<SimilarityResult> {
        rank_top_k(
            query,
            self.entries
                .iter()
                .map(|(id, embedding)| (id.as_str(), embedding.as_slice())),
            limit,
        )
    }
}

impl FromIterator<(String, Embedding)> for SimilarityIndex {
    fn from_iter<T: IntoIterator<Item = (String, Embedding)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (id, embedding) in iter {
            index.insert(id, embedding);
        }
        index
    }
}
