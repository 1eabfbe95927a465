//! Error handling for the boardflow-rs application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for boardflow-rs operations
#[derive(Error, Debug)]
pub enum BoardFlowError {
    /// A path addressed a node whose ancestors do not exist
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// A path update or transform landed on a non-container node
    #[error("Expected a container at '{path}', found {kind}")]
    NotAContainer { path: String, kind: &'static str },

    /// Errors related to decoding embedded structured content
    #[error("Decode error: {0}")]
    Decode(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// An action was dispatched with missing or mistyped arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<BoardFlowError>,
    },
}

impl BoardFlowError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        BoardFlowError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for BoardFlowError {
    fn from(err: serde_json::Error) -> Self {
        BoardFlowError::Serialization(err.to_string())
    }
}

/// Result type alias for boardflow-rs operations
pub type Result<T> = std::result::Result<T, BoardFlowError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardFlowError::PathNotFound("model.boxes.a".to_string());
        assert_eq!(err.to_string(), "Path not found: model.boxes.a");
    }

    #[test]
    fn test_error_with_context() {
        let err = BoardFlowError::Decode("unexpected token".to_string());
        let with_ctx = err.with_context("Failed to decode item content");
        assert!(with_ctx.to_string().contains("Failed to decode item content"));
    }

    #[test]
    fn test_not_a_container_error() {
        let err = BoardFlowError::NotAContainer {
            path: "model.layout.0".to_string(),
            kind: "string",
        };
        assert!(err.to_string().contains("model.layout.0"));
        assert!(err.to_string().contains("string"));
    }
}
