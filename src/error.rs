//! Error types for the youngs-catch crate.

use std::path::PathBuf;

/// Practice-session and deck errors.
#[derive(Debug, thiserror::Error)]
pub enum PracticeError {
    /// The deck contains no sentences.
    #[error("deck contains no sentences")]
    EmptyDeck,

    /// A sentence row cannot be practiced (e.g. empty English side).
    #[error("invalid sentence #{seq}: {reason}")]
    InvalidSentence { seq: u32, reason: String },

    /// Saved-only view requested with nothing saved.
    #[error("no saved expressions")]
    NothingSaved,

    /// No practice session has been loaded yet.
    #[error("no practice session loaded")]
    NoSession,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error with context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for practice operations.
pub type PracticeResult<T> = Result<T, PracticeError>;
