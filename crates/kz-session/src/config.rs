//! Configuration for a drawing session.

use std::path::PathBuf;

use kz_core::DrawConfig;

/// Configuration for a [`DrawSession`](crate::DrawSession).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding `<name>.json` deck files.
    pub decks_dir: PathBuf,
    /// Maximum number of history entries kept.
    pub history_limit: usize,
    /// Decks loaded when the session starts or is reset.
    pub preload: Vec<String>,
    /// Settings passed to the draw engine.
    pub draw: DrawConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            decks_dir: PathBuf::from("decks"),
            history_limit: 50,
            preload: vec!["拼接兽".to_string()],
            draw: DrawConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the deck directory.
    pub fn with_decks_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.decks_dir = dir.into();
        self
    }

    /// Set the history cap (at least 1).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// Set the decks to preload.
    pub fn with_preload<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preload = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the draw engine settings.
    pub fn with_draw(mut self, draw: DrawConfig) -> Self {
        self.draw = draw;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.decks_dir, PathBuf::from("decks"));
        assert_eq!(cfg.history_limit, 50);
        assert_eq!(cfg.preload, vec!["拼接兽".to_string()]);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_decks_dir("/tmp/decks")
            .with_history_limit(0)
            .with_preload(["a", "b"])
            .with_draw(DrawConfig::default().with_seed(3));
        assert_eq!(cfg.decks_dir, PathBuf::from("/tmp/decks"));
        assert_eq!(cfg.history_limit, 1);
        assert_eq!(cfg.preload, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cfg.draw.seed, Some(3));
    }
}
