//! Configuration for vault scanning.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::{Result, VaultError};

/// Which files under a vault count as notes.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Path to the vault root.
    pub root: PathBuf,

    /// File extensions to read, without the dot.
    pub extensions: Vec<String>,

    /// Patterns to exclude (glob patterns, matched against vault-relative paths).
    pub exclude_patterns: Vec<String>,

    /// Maximum depth to recurse (None = unlimited).
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl VaultConfig {
    /// Create a config that reads every markdown note under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["md".to_string()],
            exclude_patterns: Self::default_excludes(),
            max_depth: None,
            follow_symlinks: false,
        }
    }

    /// Also read files with this extension.
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Set the maximum depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Enable following symbolic links.
    pub fn follow_symlinks(mut self) -> Self {
        self.follow_symlinks = true;
        self
    }

    fn default_excludes() -> Vec<String> {
        vec![
            // App configuration and plugins
            ".obsidian/**".to_string(),
            // Deleted notes
            ".trash/**".to_string(),
            // Version control
            "**/.git/**".to_string(),
        ]
    }

    /// Compile the exclude patterns, rejecting any that are invalid.
    pub fn compile_excludes(&self) -> Result<Vec<Pattern>> {
        self.exclude_patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| VaultError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Check whether the file's extension is one we read.
    pub fn has_indexed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vault_config_creation() {
        let config = VaultConfig::new("/home/user/notes")
            .with_extension("txt")
            .with_max_depth(3);

        assert_eq!(config.root, Path::new("/home/user/notes"));
        assert_eq!(config.extensions, vec!["md", "txt"]);
        assert_eq!(config.max_depth, Some(3));
    }

    #[test]
    fn test_exclude_patterns() {
        let excludes = VaultConfig::new("/vault")
            .exclude("templates/**")
            .compile_excludes()
            .unwrap();
        let excluded = |id: &str| excludes.iter().any(|p| p.matches(id));

        assert!(excluded(".obsidian/workspace.md"));
        assert!(excluded(".trash/old.md"));
        assert!(excluded("projects/.git/HEAD"));
        assert!(excluded("templates/daily.md"));
        assert!(!excluded("projects/plan.md"));
    }

    #[test]
    fn test_extension_filter() {
        let config = VaultConfig::new("/vault");

        assert!(config.has_indexed_extension(Path::new("a/b.md")));
        assert!(config.has_indexed_extension(Path::new("a/B.MD")));
        assert!(!config.has_indexed_extension(Path::new("a/b.png")));
        assert!(!config.has_indexed_extension(Path::new("README")));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = VaultConfig::new("/vault").exclude("[");
        assert!(matches!(
            config.compile_excludes(),
            Err(VaultError::InvalidPattern { .. })
        ));
    }
}
