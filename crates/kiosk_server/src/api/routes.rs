//! Route table and handlers.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, instrument};

use crate::api::ApiError;
use crate::db::{
    DbError, DbErrorKind, Fact, GameRepository, LEADERBOARD_LIMIT, LeaderboardStanding,
};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    repository: GameRepository,
}

impl AppState {
    /// Wraps a repository for use by the router.
    #[instrument(skip(repository), fields(db_path = %repository.db_path()))]
    pub fn new(repository: GameRepository) -> Self {
        Self { repository }
    }

    /// Runs a repository call on the blocking pool.
    #[instrument(skip(self, f))]
    async fn with_repository<T, F>(&self, action: &'static str, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&GameRepository) -> Result<T, DbError> + Send + 'static,
        T: Send + 'static,
    {
        let repository = self.repository.clone();
        tokio::task::spawn_blocking(move || f(&repository))
            .await
            .map_err(|e| {
                ApiError::storage(
                    action,
                    DbError::new(DbErrorKind::Task, format!("Blocking task failed: {e}")),
                )
            })?
            .map_err(|e| ApiError::storage(action, e))
    }
}

/// Builds the application router.
///
/// | route | methods |
/// |---|---|
/// | `/api/leaderboard` | GET, POST `{playerName}` |
/// | `/api/facts` | GET, POST `{fact}` |
/// | `/health` | GET |
#[instrument(skip(state))]
pub fn router(state: AppState) -> Router {
    info!("Building router");
    Router::new()
        .route("/api/leaderboard", get(get_leaderboard).post(post_leaderboard))
        .route("/api/facts", get(get_facts).post(post_fact))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Extracts a non-empty string field from a JSON body.
///
/// Unparseable bodies, missing fields and non-string values all map to the
/// same validation error.
#[instrument(skip(payload))]
fn required_string(
    payload: Result<Json<Value>, JsonRejection>,
    field: &str,
    message: &'static str,
) -> Result<String, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(%rejection, "Unreadable JSON body");
        ApiError::validation(message)
    })?;
    match body.get(field).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        other => {
            debug!(field, found = ?other, "Field missing or not a string");
            Err(ApiError::validation(message))
        }
    }
}

#[instrument(skip(state))]
async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardStanding>>, ApiError> {
    let standings = state
        .with_repository("fetch leaderboard", |repo| repo.leaderboard(LEADERBOARD_LIMIT))
        .await?;
    Ok(Json(standings))
}

#[instrument(skip(state, payload))]
async fn post_leaderboard(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let player_name = required_string(payload, "playerName", "Invalid player name")?;
    state
        .with_repository("add win", move |repo| repo.record_win(&player_name))
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

#[instrument(skip(state))]
async fn get_facts(State(state): State<AppState>) -> Result<Json<Vec<Fact>>, ApiError> {
    let facts = state
        .with_repository("fetch facts", |repo| repo.facts())
        .await?;
    Ok(Json(facts))
}

#[instrument(skip(state, payload))]
async fn post_fact(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fact = required_string(payload, "fact", "Invalid fact")?;
    state
        .with_repository("add fact", move |repo| repo.add_fact(&fact))
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

#[instrument]
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
