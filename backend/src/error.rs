//! Error handling for the Travel Timing Recommendation Platform
//!
//! Every boundary converts failures into typed results; no error kind is
//! fatal to the process. Callers at an HTTP boundary map the stable codes
//! to status codes (`UPSTREAM_UNAVAILABLE` becomes a 502-equivalent).

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Out-of-range month, malformed identifier, negative weight.
    /// Always surfaced to the caller, never retried.
    #[error("Invalid argument `{field}`: {message}")]
    InvalidArgument { field: String, message: String },

    /// Unknown destination id or other lookup miss
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Forecast or rate provider failure (transport error or non-2xx)
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Unparseable cached payload; treated as a cache miss by callers
    #[error("Corrupt cache entry: {0}")]
    CacheCorrupt(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for each error kind
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            AppError::CacheCorrupt(_) => "CACHE_CORRUPT",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
