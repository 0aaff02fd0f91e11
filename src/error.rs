//! Error types for the tutor agent.

use thiserror::Error;

/// Library-level error type for tutor agent operations.
///
/// Malformed model output and an unavailable shared-link service are not
/// represented here: both have typed fallbacks and never surface as errors.
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Completion request failed: {0}")]
    Completion(String),

    #[error("Relay failed: {0}")]
    Relay(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for tutor agent operations.
pub type Result<T> = std::result::Result<T, TutorError>;
