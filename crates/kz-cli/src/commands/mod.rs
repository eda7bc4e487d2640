pub mod check;
pub mod decks;
pub mod draw;
pub mod export;
pub mod shell;

use std::path::Path;

use kz_core::DrawConfig;
use kz_session::{DeckSource, DirSource, DrawSession, SessionConfig};
use tracing::debug;

/// Build a session over `dir` with nothing preloaded.
fn open_session(dir: &Path, draw: DrawConfig) -> Result<DrawSession, String> {
    if !dir.is_dir() {
        return Err(format!("deck directory not found: {}", dir.display()));
    }
    debug!(dir = %dir.display(), "opening deck directory");
    let config = SessionConfig::default()
        .with_decks_dir(dir)
        .with_preload(Vec::<String>::new())
        .with_draw(draw);
    Ok(DrawSession::from_dir(config))
}

/// List deck names in `dir`.
fn available_decks(dir: &Path) -> Result<Vec<String>, String> {
    DirSource::new(dir).available().map_err(|e| e.to_string())
}
