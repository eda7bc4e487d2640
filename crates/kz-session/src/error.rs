//! Error types for drawing sessions.

use std::path::PathBuf;

use kz_core::DeckError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while running a drawing session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Drawing from a loaded deck failed.
    #[error(transparent)]
    Deck(#[from] DeckError),

    /// The deck source has no deck under this name.
    #[error("deck not found: \"{0}\"")]
    DeckNotFound(String),

    /// A file or directory could not be read or written.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A deck or snapshot is not valid JSON.
    #[error("invalid JSON in {context}: {source}")]
    Json {
        /// Where the JSON came from.
        context: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot data has the wrong shape.
    #[error("import failed: {0}")]
    Import(String),

    /// The input is not a recognised command.
    #[error("unknown command: {0} (type .help for commands)")]
    UnknownCommand(String),
}
