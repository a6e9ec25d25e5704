//! Reading notes from a vault directory.

use std::path::{Component, Path};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::VaultConfig;
use crate::document::{Document, DocumentSource};
use crate::error::{Result, VaultError};

/// Reads every matching note under a vault root.
#[derive(Debug, Clone)]
pub struct VaultScanner {
    config: VaultConfig,
}

impl VaultScanner {
    /// Create a new scanner.
    pub fn new(config: VaultConfig) -> Self {
        Self { config }
    }

    /// The scanner's configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Scan the vault and read all notes.
    ///
    /// Entries that cannot be walked or read as UTF-8, and files whose
    /// names are not UTF-8, are skipped with a warning.
    /// Documents come back sorted by ID.
    pub async fn scan(&self) -> Result<Vec<Document>> {
        let start = std::time::Instant::now();
        let root = &self.config.root;

        if !root.is_dir() {
            return Err(VaultError::RootNotFound(root.display().to_string()));
        }

        let excludes = self.config.compile_excludes()?;
        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        let mut documents = Vec::new();
        let mut skipped = 0usize;

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unwalkable entry: {err}");
                    skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.config.has_indexed_extension(entry.path()) {
                continue;
            }

            let Some(id) = vault_relative_id(root, entry.path()) else {
                warn!("Skipping note with non UTF-8 path: {}", entry.path().display());
                skipped += 1;
                continue;
            };
            if excludes.iter().any(|p| p.matches(&id)) {
                debug!("Excluded {id}");
                continue;
            }

            match fs::read_to_string(entry.path()).await {
                Ok(content) => documents.push(Document::new(id, content)),
                Err(err) => {
                    warn!("Skipping unreadable note {id}: {err}");
                    skipped += 1;
                }
            }
        }

        documents.sort_by(|a, b| a.id.cmp(&b.id));

        info!(
            "Read {} notes from {} in {:?} (skipped: {skipped})",
            documents.len(),
            root.display(),
            start.elapsed()
        );

        Ok(documents)
    }
}

#[async_trait]
impl DocumentSource for VaultScanner {
    async fn documents(&self) -> Result<Vec<Document>> {
        self.scan().await
    }
}

/// `/`-separated path of `path` relative to `root`.
fn vault_relative_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    let parts = parts?;
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
