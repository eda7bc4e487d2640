//! Configuration for drawing from decks.

/// Largest batch a single draw request may ask for.
pub const DEFAULT_MAX_BATCH: usize = 20;

/// Configuration for a [`DrawEngine`](crate::DrawEngine).
#[derive(Debug, Clone)]
pub struct DrawConfig {
    /// RNG seed for reproducible draws. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Word substituted for the `{%$t玩家}` placeholder.
    pub player_word: String,
    /// Label of the marker left when a path segment is missing.
    pub missing_label: String,
    /// Label of the marker left when a path resolves to nothing drawable.
    pub not_found_label: String,
    /// Upper bound for batch draws.
    pub max_batch: usize,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            seed: None,
            player_word: "玩家".to_string(),
            missing_label: "缺失".to_string(),
            not_found_label: "未找到".to_string(),
            max_batch: DEFAULT_MAX_BATCH,
        }
    }
}

impl DrawConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the word used for the player placeholder.
    pub fn with_player_word(mut self, word: impl Into<String>) -> Self {
        self.player_word = word.into();
        self
    }

    /// Set the batch limit (at least 1).
    pub fn with_max_batch(mut self, max: usize) -> Self {
        self.max_batch = max.max(1);
        self
    }

    /// Clamp a requested batch size to `1..=max_batch`.
    pub fn clamp_batch(&self, count: usize) -> usize {
        count.clamp(1, self.max_batch)
    }

    pub(crate) fn missing_marker(&self, segment: &str) -> String {
        format!("[{}:{segment}]", self.missing_label)
    }

    pub(crate) fn not_found_marker(&self, reference: &str) -> String {
        format!("[{}:{reference}]", self.not_found_label)
    }
}
