//! # Vault
//!
//! Supplies the documents that get embedded: every markdown note under a
//! vault directory, or a fixed list held in memory.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Vault                                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  VaultConfig ──► VaultScanner ──► Document                     │
//! │       │               │                                         │
//! │       ▼               ▼                                         │
//! │  ExcludePatterns  DocumentSource ◄── InMemorySource            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod scanner;

pub use config::VaultConfig;
pub use document::{Document, DocumentSource, InMemorySource};
pub use error::{Result, VaultError};
pub use scanner::VaultScanner;
