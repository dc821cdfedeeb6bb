//! Persistence layer for leaderboard wins and college facts.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{
    DEFAULT_FACTS, Fact, LeaderboardRow, LeaderboardStanding, NewFact, NewLeaderboardRow,
};
pub use repository::{GameRepository, LEADERBOARD_LIMIT};
