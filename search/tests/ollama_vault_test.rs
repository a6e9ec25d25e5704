//! End-to-end: notes on disk, embeddings from an Ollama-shaped HTTP server.

use std::fs;
use std::sync::Arc;

use noteseek_embeddings::TracingNotifier;
use noteseek_search::{IndexState, SearchConfig, SemanticSearch};
use noteseek_vault::{VaultConfig, VaultScanner};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn answer(server: &MockServer, prompt: &str, embedding: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .and(body_partial_json(json!({ "model": "nomic-embed-text", "prompt": prompt })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "embedding": embedding })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_vault_search_against_ollama() {
    let vault = TempDir::new().unwrap();
    fs::create_dir_all(vault.path().join("garden")).unwrap();
    fs::write(vault.path().join("garden/tomatoes.md"), "tomatoes").unwrap();
    fs::write(vault.path().join("taxes.md"), "taxes").unwrap();
    fs::write(vault.path().join("broken.md"), "server chokes on this").unwrap();

    let server = MockServer::start().await;
    answer(&server, "tomatoes", json!([0.9, 0.1, 0.0])).await;
    answer(&server, "taxes", json!([0.1, 0.2, 0.9])).await;
    answer(&server, "what should I plant?", json!([1.0, 0.0, 0.0])).await;
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .and(body_partial_json(json!({ "prompt": "server chokes on this" })))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let config = SearchConfig::from_toml_str(&format!(
        "ollama_url = \"{}\"\nembedding_model = \"nomic-embed-text\"\nmax_number_of_notes = 2\n",
        server.uri()
    ))
    .unwrap();
    let engine = SemanticSearch::from_config(&config, Arc::new(TracingNotifier));

    let report = engine
        .rebuild_from(&VaultScanner::new(VaultConfig::new(vault.path())))
        .await
        .unwrap();

    assert_eq!(engine.state().await, IndexState::Populated);
    assert_eq!(report.indexed, 3);
    assert_eq!(report.failed, vec!["broken.md".to_string()]);

    let results = engine.search_default("what should I plant?").await;
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["garden/tomatoes.md", "taxes.md"]);
    assert!(results[0].score > 0.9);
}

#[tokio::test]
async fn test_unconfigured_model_degrades_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = SearchConfig::new().with_ollama_url(server.uri());
    let engine = SemanticSearch::from_config(&config, Arc::new(TracingNotifier));

    let report = engine
        .rebuild_all(vec![noteseek_search::Document::new("a.md", "text")])
        .await;

    assert_eq!(report.failed, vec!["a.md".to_string()]);
    let results = engine.search("anything", 3).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 0.0);
}
