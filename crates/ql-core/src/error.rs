//! Error types for tokenizing and reconstructing games.

use thiserror::Error;

use crate::header::LogHeader;

/// A log line whose tokens violate its header's grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("[syntax error] {header}: {message}")]
pub struct SyntaxError {
    pub header: LogHeader,
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(header: LogHeader, message: impl Into<String>) -> Self {
        Self {
            header,
            message: message.into(),
        }
    }
}

/// A well-formed event that references state which does not exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("[context error] {header}: {message}")]
pub struct ContextError {
    pub header: LogHeader,
    pub message: String,
}

impl ContextError {
    pub(crate) fn new(header: LogHeader, message: impl Into<String>) -> Self {
        Self {
            header,
            message: message.into(),
        }
    }
}

/// Failure of a single game retrieval.
#[derive(Debug, Error)]
pub enum GameError {
    /// The in-progress game was discarded; scanning can continue.
    #[error(transparent)]
    Context(#[from] ContextError),
    /// The line supply failed; the stream ends here.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
