//! Tests for database repository operations.

use tempfile::TempDir;

use kiosk_server::{DEFAULT_FACTS, DbErrorKind, GameRepository};

/// Creates a migrated, seeded database inside a temp directory. The
/// directory handle must stay in scope to keep the file alive.
fn setup_test_db() -> (TempDir, GameRepository) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("kiosk.db").to_str().expect("Invalid path").to_string();
    let repo = GameRepository::new(db_path);
    repo.initialize().expect("Initialization failed");
    (dir, repo)
}

#[test]
fn test_initialize_seeds_default_facts_in_order() {
    let (_db, repo) = setup_test_db();
    let facts = repo.facts().expect("Query failed");
    assert_eq!(facts.len(), DEFAULT_FACTS.len());
    for (fact, expected) in facts.iter().zip(DEFAULT_FACTS) {
        assert_eq!(fact.fact(), expected);
    }
    assert!(facts.windows(2).all(|w| w[0].id() < w[1].id()));
}

#[test]
fn test_initialize_twice_does_not_reseed() {
    let (_db, repo) = setup_test_db();
    repo.initialize().expect("Second initialization failed");
    assert_eq!(repo.facts().expect("Query failed").len(), DEFAULT_FACTS.len());
}

#[test]
fn test_initialize_creates_parent_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let nested = dir.path().join("data").join("nested").join("kiosk.db");
    let repo = GameRepository::new(nested.to_str().expect("Invalid path").to_string());
    repo.initialize().expect("Initialization failed");
    assert!(nested.exists());
}

#[test]
fn test_add_fact_appends_without_dedup() {
    let (_db, repo) = setup_test_db();
    let first = repo.add_fact("The library never sleeps.").expect("Insert failed");
    let second = repo.add_fact("The library never sleeps.").expect("Insert failed");
    assert!(second.id() > first.id());

    let facts = repo.facts().expect("Query failed");
    assert_eq!(facts.len(), DEFAULT_FACTS.len() + 2);
    assert_eq!(facts.last().expect("non-empty").fact(), "The library never sleeps.");
}

#[test]
fn test_record_win_appends_row() {
    let (_db, repo) = setup_test_db();
    let row = repo.record_win("Dave").expect("Record failed");
    assert_eq!(row.player_name(), "Dave");
    assert_eq!(*row.wins(), 1);
    assert!(*row.id() > 0);
}

#[test]
fn test_leaderboard_empty() {
    let (_db, repo) = setup_test_db();
    assert!(repo.leaderboard(50).expect("Query failed").is_empty());
}

#[test]
fn test_leaderboard_aggregates_and_ranks() {
    let (_db, repo) = setup_test_db();
    for name in ["Alice", "Bob", "Alice", "Alice"] {
        repo.record_win(name).expect("Record failed");
    }

    let board = repo.leaderboard(50).expect("Query failed");
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].player_name(), "Alice");
    assert_eq!(*board[0].wins(), 3);
    assert_eq!(board[1].player_name(), "Bob");
    assert_eq!(*board[1].wins(), 1);
}

#[test]
fn test_leaderboard_ties_broken_by_most_recent_win() {
    let (_db, repo) = setup_test_db();
    repo.record_win("Early").expect("Record failed");
    std::thread::sleep(std::time::Duration::from_millis(5));
    repo.record_win("Late").expect("Record failed");

    let board = repo.leaderboard(50).expect("Query failed");
    assert_eq!(board[0].player_name(), "Late");
    assert_eq!(board[1].player_name(), "Early");
    assert!(board[0].timestamp() > board[1].timestamp());
}

#[test]
fn test_leaderboard_names_match_exactly() {
    let (_db, repo) = setup_test_db();
    for name in ["zoe", "Zoe", "Zoe "] {
        repo.record_win(name).expect("Record failed");
    }
    assert_eq!(repo.leaderboard(50).expect("Query failed").len(), 3);
}

#[test]
fn test_leaderboard_reports_latest_row_id_and_time() {
    let (_db, repo) = setup_test_db();
    repo.record_win("Ann").expect("Record failed");
    let latest = repo.record_win("Ann").expect("Record failed");

    let board = repo.leaderboard(50).expect("Query failed");
    assert_eq!(board[0].id(), latest.id());
    assert_eq!(board[0].timestamp(), latest.timestamp());
}

#[test]
fn test_leaderboard_respects_limit() {
    let (_db, repo) = setup_test_db();
    for i in 0..5 {
        repo.record_win(&format!("player{i}")).expect("Record failed");
    }
    assert_eq!(repo.leaderboard(3).expect("Query failed").len(), 3);
}

#[test]
fn test_unreachable_database_reports_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // A directory is not a database file.
    let repo = GameRepository::new(dir.path().to_str().expect("Invalid path").to_string());
    let err = repo.facts().expect_err("Directory should not open as database");
    assert!(matches!(err.kind, DbErrorKind::Connection | DbErrorKind::Query));
}
