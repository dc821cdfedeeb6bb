//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use kiosk_server::{AppState, DEFAULT_FACTS, GameRepository, router};

fn setup_app() -> (TempDir, Router) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("api.db").to_str().expect("Invalid path").to_string();
    let repo = GameRepository::new(db_path);
    repo.initialize().expect("Initialization failed");
    (dir, router(AppState::new(repo)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body read failed")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("Bad request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Bad request")
}

#[tokio::test]
async fn test_health() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_post_win_then_get_leaderboard() {
    let (_db, app) = setup_app();

    let request = post_json("/api/leaderboard", json!({ "playerName": "Zoe" }));
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send(&app, get("/api/leaderboard")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["playerName"], "Zoe");
    assert_eq!(entries[0]["wins"], 1);
    assert!(entries[0]["id"].is_number());
    assert!(entries[0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_leaderboard_ranking_over_http() {
    let (_db, app) = setup_app();
    for name in ["Alice", "Bob", "Alice", "Alice"] {
        let request = post_json("/api/leaderboard", json!({ "playerName": name }));
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, get("/api/leaderboard")).await;
    assert_eq!(body[0]["playerName"], "Alice");
    assert_eq!(body[0]["wins"], 3);
    assert_eq!(body[1]["playerName"], "Bob");
    assert_eq!(body[1]["wins"], 1);
}

#[tokio::test]
async fn test_leaderboard_capped_at_fifty() {
    let (_db, app) = setup_app();
    for i in 0..55 {
        let request = post_json("/api/leaderboard", json!({ "playerName": format!("p{i}") }));
        send(&app, request).await;
    }
    let (_, body) = send(&app, get("/api/leaderboard")).await;
    assert_eq!(body.as_array().expect("array").len(), 50);
}

#[tokio::test]
async fn test_post_win_rejects_bad_player_names() {
    let (_db, app) = setup_app();
    let payloads = [
        json!({ "playerName": 123 }),
        json!({}),
        json!({ "playerName": "" }),
        json!({ "playerName": null }),
    ];
    for bad in payloads {
        let (status, body) = send(&app, post_json("/api/leaderboard", bad.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {bad}");
        assert_eq!(body, json!({ "error": "Invalid player name" }));
    }

    let (_, body) = send(&app, get("/api/leaderboard")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_post_win_rejects_malformed_json() {
    let (_db, app) = setup_app();
    let request = Request::post("/api/leaderboard")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("Bad request");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid player name");
}

#[tokio::test]
async fn test_get_facts_returns_seeded_facts() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, get("/api/facts")).await;
    assert_eq!(status, StatusCode::OK);
    let facts = body.as_array().expect("array");
    assert_eq!(facts.len(), DEFAULT_FACTS.len());
    assert_eq!(facts[0]["fact"], DEFAULT_FACTS[0]);
    assert!(facts[0]["id"].is_number());
}

#[tokio::test]
async fn test_post_fact_appends() {
    let (_db, app) = setup_app();
    let request = post_json("/api/facts", json!({ "fact": "Go Pioneers!" }));
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = send(&app, get("/api/facts")).await;
    let facts = body.as_array().expect("array");
    assert_eq!(facts.len(), DEFAULT_FACTS.len() + 1);
    assert_eq!(facts.last().expect("non-empty")["fact"], "Go Pioneers!");
}

#[tokio::test]
async fn test_post_fact_rejects_non_string() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, post_json("/api/facts", json!({ "fact": ["list"] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid fact" }));
}

#[tokio::test]
async fn test_storage_failure_maps_to_500_and_server_keeps_serving() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // Never initialized, and a directory rather than a file.
    let app = router(AppState::new(GameRepository::new(
        dir.path().to_str().expect("Invalid path").to_string(),
    )));

    let (status, body) = send(&app, get("/api/leaderboard")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch leaderboard" }));

    let (status, body) = send(&app, post_json("/api/facts", json!({ "fact": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to add fact" }));

    let (status, _) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}
