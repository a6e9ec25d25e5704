//! Configuration for semantic search.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use noteseek_embeddings::{DEFAULT_OLLAMA_URL, OllamaProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SearchError};

/// Number of notes a search returns unless told otherwise.
pub const DEFAULT_MAX_NUMBER_OF_NOTES: usize = 5;

const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX_NUMBER_OF_NOTES) {
    Some(limit) => limit,
    None => panic!("default note limit must be positive"),
};

/// Settings as they are persisted. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchSettings {
    /// Base URL of the Ollama server.
    pub ollama_url: Option<String>,

    /// Model to request embeddings from.
    pub embedding_model: Option<String>,

    /// How many notes a search returns.
    pub max_number_of_notes: Option<i64>,
}

/// Validated search configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Base URL of the Ollama server.
    pub ollama_url: String,

    /// Model to request embeddings from. `None` means unconfigured.
    pub embedding_model: Option<String>,

    /// The K in top-K search.
    pub max_number_of_notes: NonZeroUsize,
}

impl SearchConfig {
    /// Create a configuration with default values and no model.
    pub fn new() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            embedding_model: None,
            max_number_of_notes: DEFAULT_LIMIT,
        }
    }

    /// Where the settings file lives by default.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("noteseek").join("config.toml"))
    }

    /// Parse and validate settings from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: SearchSettings = toml::from_str(content)?;
        Self::try_from(settings)
    }

    /// Read and validate a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading settings from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Set the Ollama base URL. Blank keeps the current one.
    pub fn with_ollama_url(mut self, url: impl Into<String>) -> Self {
        if let Some(url) = non_blank(url.into()) {
            self.ollama_url = url;
        }
        self
    }

    /// Set the embedding model. Blank means unconfigured.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = non_blank(model.into());
        self
    }

    /// Set how many notes a search returns. Zero is rejected.
    pub fn with_max_number_of_notes(mut self, limit: usize) -> Result<Self> {
        self.max_number_of_notes = NonZeroUsize::new(limit).ok_or_else(|| {
            SearchError::Config("max_number_of_notes must be greater than 0".to_string())
        })?;
        Ok(self)
    }

    /// Whether an embedding model has been chosen.
    pub fn is_configured(&self) -> bool {
        self.embedding_model.is_some()
    }

    /// The default result limit as a plain count.
    pub fn limit(&self) -> usize {
        self.max_number_of_notes.get()
    }

    /// Build the embedding provider these settings describe.
    pub fn provider(&self) -> OllamaProvider {
        let provider = OllamaProvider::new().with_base_url(&self.ollama_url);
        match &self.embedding_model {
            Some(model) => provider.with_model(model),
            None => provider,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<SearchSettings> for SearchConfig {
    type Error = SearchError;

    fn try_from(settings: SearchSettings) -> Result<Self> {
        let mut config = Self::new();

        if let Some(url) = settings.ollama_url {
            config = config.with_ollama_url(url);
        }
        if let Some(model) = settings.embedding_model {
            config = config.with_embedding_model(model);
        }
        if let Some(limit) = settings.max_number_of_notes {
            let limit = usize::try_from(limit).map_err(|_| {
                SearchError::Config(format!(
                    "max_number_of_notes must be greater than 0, got {limit}"
                ))
            })?;
            config = config.with_max_number_of_notes(limit)?;
        }

        Ok(config)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
