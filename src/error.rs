// src/error.rs

//! Unified error handling for the scraper core.

use std::fmt;

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller cancelled a refresh before the page arrived
    #[error("Refresh cancelled")]
    Cancelled,
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error came from the network boundary.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_display() {
        let err = AppError::Cancelled;
        assert_eq!(err.to_string(), "Refresh cancelled");
        assert!(!err.is_network());
    }

    #[test]
    fn test_io_is_not_network() {
        let err = AppError::from(std::io::Error::other("disk full"));
        assert!(matches!(err, AppError::Io(_)));
        assert!(!err.is_network());
    }

    #[test]
    fn test_selector_helper() {
        let err = AppError::selector("[[", "unexpected token");
        assert!(matches!(err, AppError::Selector { .. }));
        assert!(!err.is_network());
    }
}
