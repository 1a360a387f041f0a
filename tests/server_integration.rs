//! End-to-end tests for the HTTP server.
//!
//! Each test starts the real server on a free port and talks to it with
//! `reqwest`, swapping in different persistence collaborators to prove that
//! search logging never changes the response.

use anyhow::{bail, Result};
use async_trait::async_trait;
use kollny_core::store::memory::InMemoryStore;
use kollny_core::store::{DocumentStore, SEARCH_LOG_COLLECTION};
use kollny_express::config::{Config, DbConfig};
use kollny_express::server::{run_server_with_persistence, Persistence};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::task::JoinHandle;

// ─── Helpers ────────────────────────────────────────────────────────

const OMELETTE_PANTRY: [&str; 7] = [
    "eggs",
    "onion",
    "tomato",
    "spinach",
    "olive oil",
    "salt",
    "pepper",
];

/// A collaborator that is always down.
struct UnavailableStore;

#[async_trait]
impl DocumentStore for UnavailableStore {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn create_document(&self, _collection: &str, _document: &Value) -> Result<String> {
        bail!("connection refused")
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        bail!("connection refused")
    }
}

fn test_config(port: u16) -> Config {
    let mut cfg = Config::minimal();
    cfg.server.host = "127.0.0.1".to_string();
    cfg.server.port = port;
    cfg
}

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn wait_for_server(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/", port);
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

/// Start a server with `persistence` and return its base URL.
async fn start_server(cfg: Config, persistence: Persistence) -> (String, JoinHandle<()>) {
    let port = cfg.server.port;
    let handle = tokio::spawn(async move {
        run_server_with_persistence(&cfg, persistence).await.ok();
    });
    wait_for_server(port).await;
    (format!("http://127.0.0.1:{}", port), handle)
}

async fn post_recipes(base: &str, body: Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}/api/recipes", base))
        .header("User-Agent", "kollny-tests/1.0")
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    let body: Value = resp.json().await.unwrap();
    (status, body)
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

/// Poll until `store` holds `n` search log documents.
async fn wait_for_logs(store: &InMemoryStore, n: usize) {
    for _ in 0..50 {
        if store.documents(SEARCH_LOG_COLLECTION).len() >= n {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("search log was not written");
}

// ─── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_root_reports_identity() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let body: Value = reqwest::get(format!("{}/", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "name": "Kollny EXPRESS API", "status": "ok" }));

    handle.abort();
}

#[tokio::test]
async fn test_omelette_pantry_ranks_omelette_first() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let (status, body) = post_recipes(&base, json!({ "ingredients": OMELETTE_PANTRY })).await;
    assert_eq!(status, StatusCode::OK);

    let first = &body[0];
    assert_eq!(first["title"], "Veggie Omelette");
    assert_eq!(first["missing_ingredients"], json!([]));
    assert_eq!(first["cooking_time_minutes"], 10);
    assert_eq!(first["difficulty"], "easy");
    assert_eq!(first["is_healthy"], true);
    assert_eq!(first["ingredients"].as_array().unwrap().len(), 7);
    assert_eq!(first["steps"].as_array().unwrap().len(), 3);

    handle.abort();
}

#[tokio::test]
async fn test_results_sorted_and_half_covered() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let (status, body) = post_recipes(
        &base,
        json!({ "ingredients": ["Garlic", " SALT ", "pepper", "olive oil", "onion", "rice", "pasta", "butter"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let results = body.as_array().unwrap();
    assert!(results.len() >= 2);
    let mut prev = (0usize, 0u64);
    for r in results {
        let missing = r["missing_ingredients"].as_array().unwrap().len();
        let total = r["ingredients"].as_array().unwrap().len();
        assert!(missing <= total / 2, "{} violates half-coverage", r["title"]);
        let key = (missing, r["cooking_time_minutes"].as_u64().unwrap());
        assert!(key >= prev, "results out of order at {}", r["title"]);
        prev = key;
    }

    handle.abort();
}

#[tokio::test]
async fn test_empty_pantry_returns_empty_array() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let (status, body) = post_recipes(&base, json!({ "ingredients": [] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    handle.abort();
}

#[tokio::test]
async fn test_filters_difficulty_and_healthy_only() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let pantry = json!([
        "pasta", "garlic", "butter", "olive oil", "salt", "pepper", "parsley", "chicken", "rice",
        "onion", "paprika"
    ]);

    let (_, all) = post_recipes(&base, json!({ "ingredients": pantry })).await;
    assert!(titles(&all).contains(&"Garlic Butter Pasta".to_string()));
    assert!(titles(&all).contains(&"One-Pan Chicken & Rice".to_string()));

    let (status, medium) =
        post_recipes(&base, json!({ "ingredients": pantry, "difficulty": "medium" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!medium.as_array().unwrap().is_empty());
    assert!(medium
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["difficulty"] == "medium"));

    let (status, healthy) =
        post_recipes(&base, json!({ "ingredients": pantry, "healthy_only": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!titles(&healthy).contains(&"Garlic Butter Pasta".to_string()));
    assert!(healthy
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["is_healthy"] == true));

    handle.abort();
}

#[tokio::test]
async fn test_invalid_difficulty_is_400() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let (status, body) = post_recipes(
        &base,
        json!({ "ingredients": OMELETTE_PANTRY, "difficulty": "extreme" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("difficulty must be easy|medium|hard"));
    assert!(body.get(0).is_none(), "no partial results on error");

    handle.abort();
}

#[tokio::test]
async fn test_non_string_ingredient_is_400() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let (status, body) = post_recipes(&base, json!({ "ingredients": ["eggs", 42] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "ingredients must be a list of strings");

    let (status, _) = post_recipes(&base, json!({ "ingredients": "eggs" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_recipes(&base, json!({ "healthy_only": true })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    handle.abort();
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/recipes", base))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().starts_with("invalid JSON body"));

    handle.abort();
}

#[tokio::test]
async fn test_search_is_logged_with_client() {
    let store = Arc::new(InMemoryStore::new("kollny"));
    let (base, handle) = start_server(
        test_config(find_free_port()),
        Persistence::Ready(store.clone()),
    )
    .await;

    let (status, body) = post_recipes(
        &base,
        json!({ "ingredients": [" Eggs", "eggs", "", "ONION"], "healthy_only": true, "difficulty": "easy" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    wait_for_logs(&store, 1).await;
    let docs = store.documents(SEARCH_LOG_COLLECTION);
    let log = &docs[0].body;
    assert_eq!(log["ingredients"], json!(["eggs", "onion"]));
    assert_eq!(log["healthy_only"], true);
    assert_eq!(log["difficulty"], "easy");
    assert_eq!(log["results_count"], body.as_array().unwrap().len());
    assert_eq!(log["client"], "kollny-tests/1.0");

    handle.abort();
}

#[tokio::test]
async fn test_rejected_request_is_not_logged() {
    let store = Arc::new(InMemoryStore::default());
    let (base, handle) = start_server(
        test_config(find_free_port()),
        Persistence::Ready(store.clone()),
    )
    .await;

    let (status, _) = post_recipes(&base, json!({ "ingredients": [1, 2] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(store.documents(SEARCH_LOG_COLLECTION).is_empty());

    handle.abort();
}

#[tokio::test]
async fn test_unavailable_collaborator_does_not_change_response() {
    let (healthy_base, healthy) =
        start_server(test_config(find_free_port()), Persistence::Disabled).await;
    let (broken_base, broken) = start_server(
        test_config(find_free_port()),
        Persistence::Ready(Arc::new(UnavailableStore)),
    )
    .await;

    let request = json!({ "ingredients": OMELETTE_PANTRY, "healthy_only": true });
    let (status_a, body_a) = post_recipes(&healthy_base, request.clone()).await;
    let (status_b, body_b) = post_recipes(&broken_base, request).await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a, body_b);

    // The server keeps serving after the failed write.
    let (status_c, _) = post_recipes(&broken_base, json!({ "ingredients": [] })).await;
    assert_eq!(status_c, StatusCode::OK);

    healthy.abort();
    broken.abort();
}

#[tokio::test]
async fn test_diagnostics_without_db() {
    let (base, handle) = start_server(test_config(find_free_port()), Persistence::Disabled).await;

    let resp = reqwest::get(format!("{}/test", base)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["database"], "❌ Not Available");
    assert_eq!(body["database_url"], "❌ Not Set");
    assert_eq!(body["connection_status"], "Not Connected");
    assert_eq!(body["collections"], json!([]));

    handle.abort();
}

#[tokio::test]
async fn test_diagnostics_lists_searchlog_collection() {
    let store = Arc::new(InMemoryStore::default());
    let (base, handle) = start_server(
        test_config(find_free_port()),
        Persistence::Ready(store.clone()),
    )
    .await;

    post_recipes(&base, json!({ "ingredients": OMELETTE_PANTRY })).await;
    wait_for_logs(&store, 1).await;

    let body: Value = reqwest::get(format!("{}/test", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["connection_status"], "Connected");
    assert_eq!(body["collections"], json!(["searchlog"]));

    handle.abort();
}

#[tokio::test]
async fn test_diagnostics_with_unavailable_collaborator() {
    let (base, handle) = start_server(
        test_config(find_free_port()),
        Persistence::Ready(Arc::new(UnavailableStore)),
    )
    .await;

    let resp = reqwest::get(format!("{}/test", base)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["database"], "⚠️  Connected but Error: connection refused");

    handle.abort();
}

#[tokio::test]
async fn test_unopenable_database_still_serves() {
    let tmp = TempDir::new().unwrap();
    // A regular file where the database directory should be.
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut cfg = test_config(find_free_port());
    cfg.db = Some(DbConfig {
        path: blocker.join("kollny.sqlite"),
        name: None,
    });

    let persistence = Persistence::open(&cfg).await;
    assert!(matches!(persistence, Persistence::Failed(_)));

    let (base, handle) = start_server(cfg, persistence).await;

    let body: Value = reqwest::get(format!("{}/test", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let database = body["database"].as_str().unwrap();
    assert!(database.starts_with("❌ Error: "), "got: {}", database);
    assert!(database.trim_start_matches("❌ Error: ").chars().count() <= 50);
    assert_eq!(body["database_url"], "✅ Set");

    let (status, results) = post_recipes(&base, json!({ "ingredients": OMELETTE_PANTRY })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results[0]["title"], "Veggie Omelette");

    handle.abort();
}

#[tokio::test]
async fn test_search_logged_to_sqlite() {
    let tmp = TempDir::new().unwrap();
    let mut cfg = test_config(find_free_port());
    cfg.db = Some(DbConfig {
        path: tmp.path().join("kollny.sqlite"),
        name: Some("kollny".to_string()),
    });

    let persistence = Persistence::open(&cfg).await;
    let store = persistence.store().expect("database should open");
    let (base, handle) = start_server(cfg, persistence).await;

    post_recipes(&base, json!({ "ingredients": OMELETTE_PANTRY })).await;

    let mut collections = Vec::new();
    for _ in 0..50 {
        collections = store.list_collections().await.unwrap();
        if !collections.is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert_eq!(collections, vec!["searchlog"]);

    handle.abort();
}
