//! Error types for the toxprep library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ToxPrepError`] enum.
//!
//! # Examples
//!
//! ```
//! use toxprep::error::{ToxPrepError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ToxPrepError::column_not_found("comment_text"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for toxprep operations.
#[derive(Error, Debug)]
pub enum ToxPrepError {
    /// I/O errors (vocabulary files, persisted blobs, CSV input)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary blob encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A configured column is absent from the record set
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A stateful transformer was used before `fit`
    #[error("Transformer not fitted: {0}")]
    NotFitted(String),

    /// Invalid configuration option
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Analysis-related errors (tokenization, vocabulary building, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Row or column counts do not line up
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid argument passed to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with ToxPrepError.
pub type Result<T> = std::result::Result<T, ToxPrepError>;

impl ToxPrepError {
    /// Create a new column-not-found error.
    pub fn column_not_found<S: Into<String>>(column: S) -> Self {
        ToxPrepError::ColumnNotFound(column.into())
    }

    /// Create a new not-fitted (invalid state) error.
    pub fn not_fitted<S: Into<String>>(transformer: S) -> Self {
        ToxPrepError::NotFitted(transformer.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        ToxPrepError::InvalidConfig(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ToxPrepError::Analysis(msg.into())
    }

    /// Create a new shape mismatch error.
    pub fn shape_mismatch<S: Into<String>>(msg: S) -> Self {
        ToxPrepError::ShapeMismatch(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ToxPrepError::InvalidArgument(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        ToxPrepError::Serialization(msg.into())
    }
}

impl From<bincode::Error> for ToxPrepError {
    fn from(err: bincode::Error) -> Self {
        ToxPrepError::Serialization(err.to_string())
    }
}

impl From<regex::Error> for ToxPrepError {
    fn from(err: regex::Error) -> Self {
        ToxPrepError::InvalidConfig(format!("Invalid regex pattern: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = ToxPrepError::column_not_found("toxic");
        assert_eq!(error.to_string(), "Column not found: toxic");

        let error = ToxPrepError::not_fitted("tfidf_vectorizer");
        assert_eq!(error.to_string(), "Transformer not fitted: tfidf_vectorizer");

        let error = ToxPrepError::analysis("empty vocabulary");
        assert_eq!(error.to_string(), "Analysis error: empty vocabulary");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = ToxPrepError::from(io_error);

        match error {
            ToxPrepError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_serialization_error_display() {
        let error = ToxPrepError::serialization("truncated blob");
        assert_eq!(error.to_string(), "Serialization error: truncated blob");
    }

    #[test]
    fn test_regex_error_conversion() {
        let err = regex::Regex::new("(").unwrap_err();
        let error = ToxPrepError::from(err);
        assert!(matches!(error, ToxPrepError::InvalidConfig(_)));
    }
}
