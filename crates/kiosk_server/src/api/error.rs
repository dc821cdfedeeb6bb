//! API error type and its JSON envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use derive_more::{Display, Error};
use serde_json::json;
use tracing::{error, instrument, warn};

use crate::db::DbError;

/// Request-level failure. Never fatal to the server.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[display("Validation error: {message}")]
    Validation {
        /// Client-facing message.
        message: String,
    },
    /// The store could not complete the operation.
    #[display("Storage error while trying to {action}: {source}")]
    Storage {
        /// Client-facing message describing what failed.
        action: &'static str,
        /// Underlying storage failure.
        source: DbError,
    },
}

impl ApiError {
    /// Builds a validation error.
    #[instrument(skip(message))]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Builds a storage error for a failed `action` ("fetch leaderboard").
    #[instrument(skip(source))]
    pub fn storage(action: &'static str, source: DbError) -> Self {
        Self::Storage { action, source }
    }

    /// HTTP status for this error.
    #[instrument(skip(self))]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `{error}` envelope. Storage details stay in the log.
    #[instrument(skip(self))]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Storage { action, .. } => format!("Failed to {action}"),
        }
    }
}

impl IntoResponse for ApiError {
    #[instrument(skip(self), fields(status = %self.status()))]
    fn into_response(self) -> Response {
        match &self {
            Self::Validation { .. } => warn!(error = %self, "Rejected request"),
            Self::Storage { .. } => error!(error = %self, "Request failed"),
        }
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}
