//! Error types for the search engine.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur in the search engine.
///
/// Embedding failures never show up here; they degrade to a notice and a
/// zero score instead.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Could not parse a settings file.
    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Document enumeration failed.
    #[error("vault error: {0}")]
    Vault(#[from] noteseek_vault::VaultError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
