//! Error types for the Banter library.
//!
//! All fallible operations return [`Result`], and every failure is a
//! [`BanterError`] variant. Startup problems (a malformed corpus, an empty
//! vocabulary, a classifier that does not converge) are fatal errors from
//! training; the fallback branches of the respond pipeline are ordinary
//! return values and never surface here.
//!
//! # Examples
//!
//! ```
//! use banter::error::{BanterError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BanterError::corpus("intent has no responses"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Banter operations.
#[derive(Error, Debug)]
pub enum BanterError {
    /// I/O errors (reading corpus files, writing transcripts, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Corpus-related errors (malformed definitions, duplicate phrases, etc.)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Analysis-related errors (normalization, vocabulary building, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Training-related errors (degenerate data, non-convergence, etc.)
    #[error("Training error: {0}")]
    Training(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with BanterError.
pub type Result<T> = std::result::Result<T, BanterError>;

impl BanterError {
    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        BanterError::Corpus(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        BanterError::Analysis(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        BanterError::Training(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        BanterError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BanterError::Other(msg.into())
    }
}
