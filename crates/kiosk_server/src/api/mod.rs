//! HTTP surface: routing, handlers and error envelopes.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{AppState, router};
