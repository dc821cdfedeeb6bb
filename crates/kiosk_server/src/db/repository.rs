//! Database repository for leaderboard wins and college facts.

use std::path::Path;

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{
    DEFAULT_FACTS, DbError, DbErrorKind, Fact, LeaderboardRow, LeaderboardStanding, NewFact,
    NewLeaderboardRow, schema,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Maximum number of standings served by the API.
pub const LEADERBOARD_LIMIT: i64 = 50;

const STANDINGS_SQL: &str = "\
    SELECT MAX(id) AS id, player_name, SUM(wins) AS wins, MAX(timestamp) AS timestamp \
    FROM leaderboard \
    GROUP BY player_name \
    ORDER BY SUM(wins) DESC, MAX(timestamp) DESC \
    LIMIT ?";

/// Database repository for leaderboard and fact operations.
///
/// Each call opens its own connection; SQLite serialises writers on the file.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// Nothing is opened until the first operation.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        info!(path = %db_path, "Creating GameRepository");
        Self { db_path }
    }

    /// Path this repository connects to.
    #[instrument(skip(self))]
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })
    }

    /// Prepares the database for use: creates the parent directory, applies
    /// pending migrations and seeds the default facts if none exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the directory, migrations or seeding fail.
    #[instrument(skip(self), fields(db_path = %self.db_path))]
    pub fn initialize(&self) -> Result<(), DbError> {
        if let Some(parent) = Path::new(&self.db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut conn = self.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            DbError::new(DbErrorKind::Migration, format!("Migrations failed: {}", e))
        })?;
        info!(count = applied.len(), "Migrations applied");

        let seeded = self.seed_default_facts(&mut conn)?;
        info!(seeded, "Database initialized");
        Ok(())
    }

    /// Inserts [`DEFAULT_FACTS`] in order when the facts table is empty.
    /// Returns the number of facts inserted.
    #[instrument(skip(self, conn))]
    fn seed_default_facts(&self, conn: &mut SqliteConnection) -> Result<usize, DbError> {
        conn.transaction::<_, DbError, _>(|conn| {
            let existing: i64 = schema::facts::table.count().get_result(conn)?;
            if existing > 0 {
                debug!(existing, "Facts already present, skipping seed");
                return Ok(0);
            }

            for text in DEFAULT_FACTS {
                diesel::insert_into(schema::facts::table)
                    .values(&NewFact::new(text.to_string()))
                    .execute(conn)?;
            }
            info!(count = DEFAULT_FACTS.len(), "Default facts seeded");
            Ok(DEFAULT_FACTS.len())
        })
    }

    /// Appends one win for `player_name`, stamped with the current UTC time.
    ///
    /// Names are stored verbatim; no trimming or case folding.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn record_win(&self, player_name: &str) -> Result<LeaderboardRow, DbError> {
        debug!("Recording win");
        let mut conn = self.connection()?;

        let row = NewLeaderboardRow::new(
            player_name.to_string(),
            1,
            chrono::Utc::now().naive_utc(),
        );

        let recorded: LeaderboardRow = diesel::insert_into(schema::leaderboard::table)
            .values(&row)
            .returning(LeaderboardRow::as_returning())
            .get_result(&mut conn)?;

        info!(row_id = recorded.id(), player_name = %recorded.player_name(), "Win recorded");
        Ok(recorded)
    }

    /// Returns per-player totals, most wins first, then most recent win first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardStanding>, DbError> {
        debug!("Loading leaderboard");
        let mut conn = self.connection()?;

        let standings = diesel::sql_query(STANDINGS_SQL)
            .bind::<BigInt, _>(limit)
            .load::<LeaderboardStanding>(&mut conn)?;

        info!(count = standings.len(), "Leaderboard loaded");
        Ok(standings)
    }

    /// Returns every fact in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn facts(&self) -> Result<Vec<Fact>, DbError> {
        debug!("Loading facts");
        let mut conn = self.connection()?;

        let facts = schema::facts::table
            .order(schema::facts::id.asc())
            .select(Fact::as_select())
            .load::<Fact>(&mut conn)?;

        info!(count = facts.len(), "Facts loaded");
        Ok(facts)
    }

    /// Appends a fact. Duplicates are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn add_fact(&self, text: &str) -> Result<Fact, DbError> {
        debug!("Adding fact");
        let mut conn = self.connection()?;

        let fact: Fact = diesel::insert_into(schema::facts::table)
            .values(&NewFact::new(text.to_string()))
            .returning(Fact::as_returning())
            .get_result(&mut conn)?;

        info!(fact_id = fact.id(), "Fact added");
        Ok(fact)
    }
}
