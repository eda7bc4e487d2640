//! The draw engine.
//!
//! Drawing from a deck happens in three steps:
//!
//! 1. Locate the pool. A key equal to the deck's own name wins; otherwise
//!    the first array-valued key in declaration order is used.
//! 2. Pick one entry from it by weight.
//! 3. Resolve the entry's placeholders against the same document.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::DrawConfig;
use crate::deck::DeckDocument;
use crate::error::{DeckError, DeckResult};
use crate::registry::DeckRegistry;
use crate::resolver::ReferenceResolver;
use crate::weight::WeightedPool;

/// The outcome of a single draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    /// The deck that was drawn from.
    pub deck_name: String,
    /// The entry as written in the deck, before resolution.
    pub raw_entry: String,
    /// The entry with all placeholders substituted.
    pub resolved_text: String,
    /// When the draw happened.
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolved_text)
    }
}

/// Draws resolved entries from the decks in its registry.
#[derive(Debug, Clone)]
pub struct DrawEngine {
    registry: DeckRegistry,
    config: DrawConfig,
    rng: StdRng,
}

impl DrawEngine {
    /// Create an engine with an empty registry.
    pub fn new(config: DrawConfig) -> Self {
        Self::with_registry(DeckRegistry::new(), config)
    }

    /// Create an engine that owns an existing registry.
    pub fn with_registry(registry: DeckRegistry, config: DrawConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            registry,
            config,
            rng,
        }
    }

    /// The registry of loaded decks.
    pub fn registry(&self) -> &DeckRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for loading or resetting decks.
    pub fn registry_mut(&mut self) -> &mut DeckRegistry {
        &mut self.registry
    }

    /// The engine configuration.
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Draw one resolved entry from the deck `name`.
    pub fn draw(&mut self, name: &str) -> DeckResult<DrawResult> {
        let document = self
            .registry
            .get(name)
            .ok_or_else(|| DeckError::UnknownDeck(name.to_string()))?;

        let (key, items) = locate_pool(document, name)?;
        let entry = WeightedPool::from_values(items)
            .pick(&mut self.rng)
            .copied()
            .ok_or_else(|| DeckError::EmptyPool(name.to_string()))?;
        debug!(deck = name, pool = key, entry = entry.raw, "entry drawn");

        let resolved_text =
            ReferenceResolver::new(document, &self.config).resolve(entry.content, &mut self.rng);

        Ok(DrawResult {
            deck_name: name.to_string(),
            raw_entry: entry.raw.to_string(),
            resolved_text,
            timestamp: Utc::now(),
        })
    }

    /// Draw `count` independent results (with replacement).
    ///
    /// `count` is clamped to `1..=max_batch`.
    pub fn draw_many(&mut self, name: &str, count: usize) -> DeckResult<Vec<DrawResult>> {
        let count = self.config.clamp_batch(count);
        (0..count).map(|_| self.draw(name)).collect()
    }
}

/// Find the pool to draw from in a deck document.
///
/// Returns the pool's key and items. The pool may still be empty; drawing
/// from it reports that.
pub fn locate_pool<'a>(document: &'a DeckDocument, name: &str) -> DeckResult<(&'a str, &'a [Value])> {
    let table = document
        .table()
        .ok_or_else(|| DeckError::MalformedDeck(name.to_string()))?;

    if let Some((key, Value::Array(items))) = table.get_key_value(name) {
        debug!(deck = name, "using pool named after the deck");
        return Ok((key.as_str(), items.as_slice()));
    }

    document
        .pools()
        .next()
        .ok_or_else(|| DeckError::EmptyPool(name.to_string()))
}
