//! Kiosk server library - leaderboard and facts persistence behind a JSON API.
//!
//! # Architecture
//!
//! - **db**: Diesel/SQLite repository, embedded migrations, default facts
//! - **api**: axum router, request validation, `{error}` envelopes
//!
//! # Example
//!
//! ```no_run
//! use kiosk_server::{AppState, GameRepository, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let repository = GameRepository::new("data/tictactoe.db".to_string());
//! repository.initialize()?;
//! let app = router(AppState::new(repository));
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", 3001)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod db;

pub use api::{ApiError, AppState, router};
pub use db::{
    DEFAULT_FACTS, DbError, DbErrorKind, Fact, GameRepository, LEADERBOARD_LIMIT, LeaderboardRow,
    LeaderboardStanding, NewFact, NewLeaderboardRow,
};
