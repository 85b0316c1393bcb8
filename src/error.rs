//! Custom error types for lectern
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the lectern application
#[derive(Error, Debug)]
pub enum LecternError {
    /// The auth collaborator rejected a login attempt
    #[error("{0}")]
    AuthFailed(String),

    /// The auth collaborator rejected a registration attempt
    #[error("{0}")]
    RegistrationFailed(String),

    /// Course platform API error with a reason from the backend
    #[error("Request failed: {0}\n\n  → Check that the course backend is reachable.\n  → Run 'lec config show' to verify the API URL.")]
    Api(String),

    /// Quiz generation failed
    #[error("Failed to generate quiz: {0}\n\n  → Try a smaller question count, or check the backend logs.")]
    QuizGeneration(String),

    /// Student id not present in the analytics data
    #[error("Student '{0}' was not found.\n\n  → Run 'lec roster' to see known students.")]
    StudentNotFound(String),

    /// Unknown course module id
    #[error("Module '{0}' does not exist.\n\n  → Modules are numbered 1 through 5.")]
    ModuleNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid API base URL in configuration
    #[error("Cannot parse API URL: {0}\n\n  → Expected format: http://host:port\n  → Run 'lec config set api-url <url>' to fix it.")]
    InvalidApiUrl(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Network request error
    #[error("Network request failed: {0}\n\n  → Check your internet connection.")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl From<toml::de::Error> for LecternError {
    fn from(err: toml::de::Error) -> Self {
        LecternError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for LecternError {
    fn from(err: toml::ser::Error) -> Self {
        LecternError::Toml(err.to_string())
    }
}

impl From<url::ParseError> for LecternError {
    fn from(err: url::ParseError) -> Self {
        LecternError::InvalidApiUrl(err.to_string())
    }
}

/// Result type alias using LecternError
pub type Result<T> = std::result::Result<T, LecternError>;
