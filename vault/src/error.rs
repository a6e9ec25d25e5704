//! Error types for vault scanning.

use thiserror::Error;

/// Result type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors that can occur while enumerating documents.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Vault root does not exist or is not a directory.
    #[error("vault not found: {0}")]
    RootNotFound(String),

    /// Invalid exclude pattern.
    #[error("invalid exclude pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
