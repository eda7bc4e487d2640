//! Interactive deck drawing on top of `kz-core`.
//!
//! Provides the `.draw` command language, a capped draw history, loading
//! decks from a directory of JSON files, snapshot export/import, and a
//! [`DrawSession`] that ties them together.

pub mod command;
pub mod config;
pub mod error;
pub mod history;
pub mod session;
pub mod snapshot;
pub mod source;

pub use command::{Command, ExportFormat, parse_command};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use history::{History, HistoryEntry};
pub use session::DrawSession;
pub use snapshot::Snapshot;
pub use source::{DeckSource, DirSource};
