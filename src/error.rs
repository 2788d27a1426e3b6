//! Error types for the kona application.
//!
//! This module defines a comprehensive error enum that covers all possible
//! error conditions in the application, plus the HTTP mapping used by the
//! handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// The main error type for kona operations.
#[derive(Error, Debug)]
pub enum KonaError {
    /// SQLite driver errors
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Date parsing errors (observation dates are `YYYY-MM-DD` strings)
    #[error("Date error: {0}")]
    Date(#[from] chrono::ParseError),

    /// Schema reflection errors (expected table or column missing)
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl KonaError {
    /// The HTTP status this error maps to at the API surface.
    pub fn status_code(&self) -> StatusCode {
        match self {
            KonaError::DataNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for KonaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(serde_json::json!({
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}

/// Convenience type alias for Results with KonaError
pub type Result<T> = std::result::Result<T, KonaError>;
