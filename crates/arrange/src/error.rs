//! Error types for Arrange operations.
//!
//! Layout itself never fails: malformed graphs degrade to a partial or
//! coarser arrangement. [`ArrangeError`] covers the surfaces around the
//! engine, reading and writing serialized documents.

use std::io;

use thiserror::Error;

/// The main error type for Arrange operations.
#[derive(Debug, Error)]
pub enum ArrangeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid JSON. Carries the source text so callers
    /// can point at the offending line.
    #[error("Invalid workflow document: {err}")]
    Parse { err: serde_json::Error, src: String },

    #[error("Workflow error: {0}")]
    Workflow(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ArrangeError {
    /// Creates a parse error from a JSON syntax error and the text that failed.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        ArrangeError::Parse {
            err,
            src: src.into(),
        }
    }
}
