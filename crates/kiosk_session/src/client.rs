//! HTTP client for the leaderboard and facts API.

use async_trait::async_trait;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};

/// One leaderboard line as served by `GET /api/leaderboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    id: i64,
    player_name: String,
    wins: i64,
    timestamp: String,
}

/// One fact as served by `GET /api/facts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct CollegeFact {
    id: i64,
    fact: String,
}

/// Client-side request failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Network error: {} at {}:{}", message, file, line)]
pub struct NetworkError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl NetworkError {
    /// Creates a new network error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("Request failed: {}", err))
    }
}

/// Operations the session needs from the backend.
#[async_trait]
pub trait KioskApi: Send + Sync {
    /// Current standings, best first.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, NetworkError>;

    /// All facts in display order.
    async fn facts(&self) -> Result<Vec<CollegeFact>, NetworkError>;

    /// Records one win for `player_name`.
    async fn record_win(&self, player_name: &str) -> Result<(), NetworkError>;
}

/// [`KioskApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpKioskApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpKioskApi {
    /// Creates a client for `base_url` (for example `http://localhost:3001/api`).
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(%base_url, "Creating API client");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    #[instrument(skip(self))]
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl KioskApi for HttpKioskApi {
    #[instrument(skip(self))]
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, NetworkError> {
        let entries: Vec<LeaderboardEntry> = self
            .client
            .get(self.url("leaderboard"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(count = entries.len(), "Leaderboard fetched");
        Ok(entries)
    }

    #[instrument(skip(self))]
    async fn facts(&self) -> Result<Vec<CollegeFact>, NetworkError> {
        let facts: Vec<CollegeFact> = self
            .client
            .get(self.url("facts"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(count = facts.len(), "Facts fetched");
        Ok(facts)
    }

    #[instrument(skip(self))]
    async fn record_win(&self, player_name: &str) -> Result<(), NetworkError> {
        self.client
            .post(self.url("leaderboard"))
            .json(&json!({ "playerName": player_name }))
            .send()
            .await?
            .error_for_status()?;
        info!("Win submitted");
        Ok(())
    }
}
