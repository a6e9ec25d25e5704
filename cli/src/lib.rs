//! Command-line shell around the semantic search engine.
//!
//! Each invocation scans the vault, rebuilds the index and, for `search`,
//! runs one query. Nothing is persisted between runs.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use noteseek_embeddings::Notifier;
use noteseek_search::{RebuildReport, SearchConfig, SemanticSearch, SimilarityResult};
use noteseek_vault::{VaultConfig, VaultScanner};
use tracing::{debug, info, warn};

/// Semantic search over a folder of markdown notes, using Ollama embeddings.
#[derive(Debug, Parser)]
#[command(name = "noteseek", version)]
pub struct Cli {
    /// Settings file (TOML). Defaults to the user config directory.
    #[arg(long, global = true, env = "NOTESEEK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the Ollama server.
    #[arg(long, global = true, env = "OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Embedding model to request.
    #[arg(long, global = true, env = "NOTESEEK_MODEL")]
    pub model: Option<String>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Embed every note and report how many succeeded.
    Index(VaultArgs),

    /// Rank notes against a query.
    Search {
        #[command(flatten)]
        vault: VaultArgs,

        /// How many notes to return (overrides the settings file).
        #[arg(short, long)]
        limit: Option<usize>,

        /// The query text.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct VaultArgs {
    /// Vault root directory.
    #[arg(long, env = "NOTESEEK_VAULT")]
    pub vault: PathBuf,

    /// Extra glob patterns to skip, relative to the vault root.
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,
}

impl VaultArgs {
    fn scanner(&self) -> VaultScanner {
        let config = self
            .exclude
            .iter()
            .fold(VaultConfig::new(&self.vault), |config, pattern| {
                config.exclude(pattern)
            });
        VaultScanner::new(config)
    }
}

/// Prints notices to stderr, where a person running the command sees them.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        debug!(target: "noteseek::notice", "{message}");
        eprintln!("Notice: {message}");
    }
}

/// Settings file values with command-line overrides applied.
pub fn resolve_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => match SearchConfig::default_path() {
            Some(path) if path.exists() => SearchConfig::load(&path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            _ => SearchConfig::default(),
        },
    };

    if let Some(url) = &cli.ollama_url {
        config = config.with_ollama_url(url);
    }
    if let Some(model) = &cli.model {
        config = config.with_embedding_model(model);
    }
    if let Command::Search {
        limit: Some(limit), ..
    } = &cli.command
    {
        config = config.with_max_number_of_notes(*limit)?;
    }

    Ok(config)
}

/// Run one command to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    if !config.is_configured() {
        warn!("No embedding model configured; every note will score 0");
    }
    let engine = SemanticSearch::from_config(&config, Arc::new(StderrNotifier));

    match &cli.command {
        Command::Index(vault) => {
            let report = engine.rebuild_from(&vault.scanner()).await?;
            println!("{}", render_report(&report, cli.json)?);
        }
        Command::Search { vault, query, .. } => {
            engine.rebuild_from(&vault.scanner()).await?;
            let query = query.join(" ");
            info!("Searching for {query:?}");
            let results = engine.search_default(&query).await;
            println!("{}", render_results(&results, cli.json)?);
        }
    }

    Ok(())
}

/// Format a rebuild summary.
pub fn render_report(report: &RebuildReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut out = format!(
        "Indexed {} notes in {}ms ({} failed)",
        report.indexed,
        report.duration_ms,
        report.failed.len()
    );
    for id in &report.failed {
        out.push_str(&format!("\n  failed: {id}"));
    }
    Ok(out)
}

/// Format search results, best first.
pub fn render_results(results: &[SimilarityResult], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(results)?);
    }

    if results.is_empty() {
        return Ok("No matching notes.".to_string());
    }
    Ok(results
        .iter()
        .map(|r| format!("{:.4}  {}", r.score, r.id))
        .collect::<Vec<_>>()
        .join("\n"))
}
