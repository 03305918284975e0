//! Integration tests for the kousei-server API endpoints.
//!
//! The app under test uses an in-memory store with the seeded sample data
//! and a rules-only checker, so no model files or disk databases are
//! required.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use kousei_core::checker::rules_only;
use kousei_server::{build_router, AppState};
use kousei_store::LexiconStore;

fn setup_app() -> axum::Router {
    let store = LexiconStore::open_in_memory().expect("in-memory store");
    store.init_schema().expect("schema");
    store.seed_defaults().expect("seed");

    let data = store.lexicon_data().expect("lexicon data");
    let checker = rules_only(data).expect("checker");

    let state = AppState::new(checker, store, "bert-base-uncased".into());
    build_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

// =============================================================================
// Health endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "kousei-server");
    assert_eq!(body["model_loaded"], false);
    assert!(body["version"].is_string());
}

// =============================================================================
// Check endpoint
// =============================================================================

#[tokio::test]
async fn test_check_known_misspellings() {
    let app = setup_app();

    let request = post_json(
        "/api/check",
        json!({"text": "I recieve the package yesterday and it was definately worth it."}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body["corrected_text"],
        "I receive the package yesterday and it was definitely worth it."
    );
    assert_eq!(body["corrections_made"].as_array().unwrap().len(), 2);
    assert_eq!(body["corrections_made"][0]["kind"], "spelling");
    assert_eq!(body["mode"], "rules");
}

#[tokio::test]
async fn test_check_homophones() {
    let app = setup_app();

    let request = post_json(
        "/api/check",
        json!({"text": "Their going to the store to buy there groceries."}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body["corrected_text"],
        "They're going to the store to buy their groceries."
    );
    let kinds: Vec<&str> = body["corrections_made"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["homophone", "homophone"]);
}

#[tokio::test]
async fn test_check_clean_text() {
    let app = setup_app();

    let request = post_json("/api/check", json!({"text": "The sun is shining bright."}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["corrected_text"], "The sun is shining bright.");
    assert_eq!(body["confidence_score"], 1.0);
    assert!(body["corrections_made"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_check_includes_statistics() {
    let app = setup_app();

    let request = post_json(
        "/api/check",
        json!({"text": "This is a test sentence. It has multiple sentences!"}),
    );
    let response = app.oneshot(request).await.unwrap();
    let body = extract_json(response.into_body()).await;

    let stats = &body["text_statistics"];
    assert_eq!(stats["word_count"], 9);
    assert_eq!(stats["sentence_count"], 2);
    assert!(stats["flesch_reading_ease"].is_number());
}

#[tokio::test]
async fn test_check_empty_text_rejected() {
    let app = setup_app();

    let request = post_json("/api/check", json!({"text": "   "}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_check_records_history() {
    let app = setup_app();

    let request = post_json("/api/check", json!({"text": "She went to teh store."}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/stats")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["store"]["checks"], 1);
    assert_eq!(body["recent_checks"][0]["input"], "She went to teh store.");
    assert_eq!(body["recent_checks"][0]["corrected"], "She went to the store.");
}

// =============================================================================
// Models endpoint
// =============================================================================

#[tokio::test]
async fn test_models_endpoint() {
    let app = setup_app();

    let response = app.oneshot(get("/api/models")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let available = body["available_models"].as_array().unwrap();
    assert!(available.iter().any(|m| m == "bert-base-uncased"));
    assert!(available.iter().any(|m| m == "distilbert-base-uncased"));
    assert_eq!(body["current_model"], "bert-base-uncased");
    assert_eq!(body["model_loaded"], false);
}

// =============================================================================
// Stats endpoint
// =============================================================================

#[tokio::test]
async fn test_stats_endpoint() {
    let app = setup_app();

    let response = app.oneshot(get("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["store"]["misspellings"], 5);
    assert_eq!(body["store"]["homophone_groups"], 4);
    assert_eq!(body["store"]["checks"], 0);
    assert_eq!(body["homophone_groups"].as_array().unwrap().len(), 4);
}

// =============================================================================
// UI routes
// =============================================================================

#[tokio::test]
async fn test_ui_routes_served() {
    let app = setup_app();

    for uri in ["/", "/dashboard"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "route {uri}");
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"), "route {uri}");
    }

    for uri in ["/static/app.js", "/static/dashboard.js"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "route {uri}");
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("application/javascript"), "route {uri}");
    }
}

#[tokio::test]
async fn test_unknown_route_404() {
    let app = setup_app();
    let response = app.oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
