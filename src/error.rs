//! Error types for statement extraction.
//!
//! Missing fields are never errors: a field that no pattern matches is simply
//! `None` on the [`StatementRecord`](crate::domain::StatementRecord). The
//! variants here cover the cases where an extraction attempt cannot run at
//! all, and the one recoverable case where the assisted path is unavailable.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for extraction operations.
pub type ParserResult<T> = Result<T, ParserError>;

/// Error type for all extraction operations.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Input was not something we can extract from (not a PDF, not text, missing).
    #[error("Invalid input for '{parameter}': {reason}")]
    InputValidation { parameter: String, reason: String },

    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The PDF library could not recover text from the document
    #[error("Text extraction failed for '{}': {reason}", path.display())]
    TextExtraction { path: PathBuf, reason: String },

    /// The language-model path could not produce a record.
    ///
    /// Recoverable: callers are expected to report it or fall back to
    /// pattern extraction.
    #[error("Assisted extraction unavailable ({provider}): {reason}")]
    AssistedExtractionUnavailable { provider: String, reason: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error in '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ParserError {
    /// Shorthand for an [`ParserError::InputValidation`] error.
    pub fn invalid_input(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InputValidation {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`ParserError::AssistedExtractionUnavailable`] error.
    pub fn unavailable(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AssistedExtractionUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Returns true when the caller can fall back to pattern extraction.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AssistedExtractionUnavailable { .. })
    }
}
