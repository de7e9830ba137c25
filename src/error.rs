// Error types for JusticeHub
//
// Structured errors raised by the database layer, configuration loading and
// the Empathy Ledger client. Library functions return `crate::Result`
// (anyhow), so these convert transparently with `?`.

use std::io;
use thiserror::Error;

/// Main error type for JusticeHub operations
#[derive(Debug, Error)]
pub enum HubError {
    /// Database operation errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A write collided with a UNIQUE constraint
    #[error("Database error: {0}")]
    UniqueViolation(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Upstream API answered with a non-success status
    #[error("HTTP error (status {status}): {details}")]
    HttpError { status: u16, details: String },

    /// Reqwest HTTP client errors
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Invalid input from user or configuration
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// File system errors
    #[error("File system error: {path}: {source}")]
    FileSystemError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Generic I/O error
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: io::Error,
    },
}

impl HubError {
    /// Shorthand for an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        HubError::InvalidInput {
            message: message.into(),
        }
    }

    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        HubError::ConfigError {
            message: message.into(),
        }
    }

    /// Whether a UNIQUE constraint on `column` rejected the write
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        matches!(self, HubError::UniqueViolation(message) if message.contains(column))
    }

    /// Whether the error was caused by bad input rather than a failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HubError::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_keeps_message() {
        let err = HubError::DatabaseError("no such table: services".to_string());
        assert_eq!(err.to_string(), "Database error: no such table: services");
    }

    #[test]
    fn test_http_error_display() {
        let err = HubError::HttpError {
            status: 502,
            details: "bad gateway".to_string(),
        };
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn test_unique_violation_matches_column() {
        let err = HubError::UniqueViolation("UNIQUE constraint failed: frameworks.slug".to_string());
        assert!(err.is_unique_violation_on("slug"));
        assert!(!err.is_unique_violation_on("email"));
        assert!(!HubError::DatabaseError("slug".to_string()).is_unique_violation_on("slug"));
        assert!(err.to_string().starts_with("Database error: "));
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(HubError::invalid_input("title is required").is_invalid_input());
        assert!(!HubError::config("missing key").is_invalid_input());
    }
}
