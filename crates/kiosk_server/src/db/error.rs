//! Storage error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Broad category of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// Could not open the database file.
    #[display("connection")]
    Connection,
    /// A statement failed (constraint, lock, disk).
    #[display("query")]
    Query,
    /// Schema migrations could not be applied.
    #[display("migration")]
    Migration,
    /// Filesystem preparation failed.
    #[display("io")]
    Io,
    /// The blocking worker running the operation died.
    #[display("task")]
    Task,
}

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failure category.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, format!("Connection error: {}", err))
    }
}

impl From<std::io::Error> for DbError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(DbErrorKind::Io, format!("IO error: {}", err))
    }
}
