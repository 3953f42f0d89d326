//! Error types for geonames

use thiserror::Error;

/// Main error type for geonames operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Insufficient privileges: {0}")]
    InsufficientPrivileges(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request timed out: {0}")]
    TimedOut(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Authentication failure: {0}")]
    AuthenticationFailure(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for geonames operations
pub type Result<T> = std::result::Result<T, Error>;
