//! Error types for the moveitlib library.

use thiserror::Error;

/// Main error type for moveitlib operations.
///
/// Absence is never an error: lookups that find nothing return `Ok(None)`.
#[derive(Error, Debug)]
pub enum MoveitError {
    /// Token exchange failed, or a call stayed unauthorized after a single
    /// re-authentication. Terminal for the client that hit it.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Non-401 HTTP failure reported by the API. Not retried.
    #[error("HTTP error: {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Network-level request error.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row or payload that parsed but cannot be right, e.g. a matched
    /// record carrying a NULL identifier.
    #[error("inconsistent data: {0}")]
    DataInconsistency(String),

    /// WebDriver command failed.
    #[error("webdriver error: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    /// WebDriver session could not be established.
    #[error("webdriver session error: {0}")]
    BrowserSession(#[from] fantoccini::error::NewSessionError),

    /// Local file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for moveitlib operations.
pub type Result<T> = std::result::Result<T, MoveitError>;
