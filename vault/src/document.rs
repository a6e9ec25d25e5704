//! Documents and where they come from.

use async_trait::async_trait;

use crate::error::Result;

/// A note to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier, unique within one snapshot (a vault-relative path).
    pub id: String,

    /// UTF-8 text content.
    pub content: String,
}

impl Document {
    /// Create a new document.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Anything that can enumerate the current set of documents.
///
/// Every call returns a fresh snapshot; nothing is diffed against earlier calls.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Read all documents.
    async fn documents(&self) -> Result<Vec<Document>>;
}

/// A fixed list of documents.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: Vec<Document>,
}

impl InMemorySource {
    /// Create a source over the given documents.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Add a document.
    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }
}

impl FromIterator<Document> for InMemorySource {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    async fn documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}
