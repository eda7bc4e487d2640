//! Where decks come from.
//!
//! The engine never fetches decks itself. A [`DeckSource`] hands it parsed
//! documents on demand; [`DirSource`] reads `<dir>/<name>.json`.

use std::path::PathBuf;

use kz_core::DeckDocument;
use tracing::debug;

use crate::error::{SessionError, SessionResult};

/// A provider of deck documents by name.
pub trait DeckSource {
    /// Fetch the deck `name`, or `Ok(None)` if this source has no such deck.
    fn fetch(&self, name: &str) -> SessionResult<Option<DeckDocument>>;

    /// Names of every deck this source can provide, sorted.
    fn available(&self) -> SessionResult<Vec<String>>;
}

/// Reads decks from JSON files in a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The file a deck name maps to, or `None` for names that would escape
    /// the directory.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        let invalid = name.is_empty()
            || name == "."
            || name.contains("..")
            || name.contains(['/', '\\', '\0']);
        if invalid {
            return None;
        }
        Some(self.dir.join(format!("{name}.json")))
    }
}

impl DeckSource for DirSource {
    fn fetch(&self, name: &str) -> SessionResult<Option<DeckDocument>> {
        let Some(path) = self.path_for(name) else {
            return Ok(None);
        };
        if !path.is_file() {
            debug!(path = %path.display(), "no deck file");
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;
        let document = DeckDocument::from_json(&text).map_err(|source| SessionError::Json {
            context: path.display().to_string(),
            source,
        })?;
        Ok(Some(document))
    }

    fn available(&self) -> SessionResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| SessionError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn deck_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("combat.json"), r#"{"combat": ["Ambush"]}"#).unwrap();
        fs::write(dir.path().join("拼接兽.json"), r#"{"拼接兽": ["{%a}"], "a": "X"}"#).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        dir
    }

    #[test]
    fn fetch_existing_deck() {
        let dir = deck_dir();
        let source = DirSource::new(dir.path());
        let doc = source.fetch("combat").unwrap().unwrap();
        assert!(doc.table().unwrap().contains_key("combat"));
        assert!(source.fetch("拼接兽").unwrap().is_some());
    }

    #[test]
    fn fetch_missing_deck_is_none() {
        let dir = deck_dir();
        let source = DirSource::new(dir.path());
        assert!(source.fetch("nope").unwrap().is_none());
    }

    #[test]
    fn fetch_invalid_json_fails() {
        let dir = deck_dir();
        let source = DirSource::new(dir.path());
        let err = source.fetch("broken").unwrap_err();
        assert!(matches!(err, SessionError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn path_escapes_are_rejected() {
        let source = DirSource::new("decks");
        assert!(source.path_for("../secret").is_none());
        assert!(source.path_for("a/b").is_none());
        assert!(source.path_for("a\\b").is_none());
        assert!(source.path_for("").is_none());
        assert_eq!(
            source.path_for("combat"),
            Some(PathBuf::from("decks").join("combat.json"))
        );
    }

    #[test]
    fn available_lists_json_files_sorted() {
        let dir = deck_dir();
        let source = DirSource::new(dir.path());
        assert_eq!(
            source.available().unwrap(),
            vec!["broken".to_string(), "combat".to_string(), "拼接兽".to_string()]
        );
    }

    #[test]
    fn available_on_missing_dir_fails() {
        let source = DirSource::new("/definitely/not/here");
        assert!(matches!(
            source.available(),
            Err(SessionError::Io { .. })
        ));
    }
}
