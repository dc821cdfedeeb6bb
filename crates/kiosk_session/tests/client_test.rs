//! `HttpKioskApi` against a live router on an ephemeral port.

use kiosk_server::{AppState, DEFAULT_FACTS, GameRepository, router};
use kiosk_session::{HttpKioskApi, KioskApi};
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn serve() -> (TempDir, String) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("client.db").to_str().expect("Invalid path").to_string();
    let repo = GameRepository::new(db_path);
    repo.initialize().expect("Initialization failed");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Bind failed");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(repo)))
            .await
            .expect("Server failed");
    });
    (dir, format!("http://{addr}/api"))
}

#[tokio::test]
async fn test_facts_round_trip() {
    let (_db, base) = serve().await;
    let api = HttpKioskApi::new(&base);
    let facts = api.facts().await.expect("facts");
    assert_eq!(facts.len(), DEFAULT_FACTS.len());
    assert_eq!(facts[0].fact(), DEFAULT_FACTS[0]);
}

#[tokio::test]
async fn test_recorded_wins_show_on_leaderboard() {
    let (_db, base) = serve().await;
    // Trailing slash is tolerated.
    let api = HttpKioskApi::new(format!("{base}/"));

    assert!(api.leaderboard().await.expect("leaderboard").is_empty());
    api.record_win("Zoe").await.expect("record");
    api.record_win("Zoe").await.expect("record");
    api.record_win("Ann").await.expect("record");

    let board = api.leaderboard().await.expect("leaderboard");
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].player_name(), "Zoe");
    assert_eq!(*board[0].wins(), 2);
    assert_eq!(board[1].player_name(), "Ann");
}

#[tokio::test]
async fn test_rejected_name_is_an_error() {
    let (_db, base) = serve().await;
    let api = HttpKioskApi::new(&base);
    assert!(api.record_win("").await.is_err());
}

#[tokio::test]
async fn test_unreachable_backend_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Bind failed");
    let addr = listener.local_addr().expect("No local addr");
    drop(listener);

    let api = HttpKioskApi::new(format!("http://{addr}/api"));
    let err = api.leaderboard().await.expect_err("nothing listening");
    assert!(err.message.contains("Request failed"));
}
