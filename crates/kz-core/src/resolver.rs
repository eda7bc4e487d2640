//! Placeholder substitution.
//!
//! Entry text may contain `{%path}` placeholders that point into the deck the
//! entry came from. Substitution is a single left-to-right pass: text that a
//! placeholder expands to is not scanned again, so a table entry containing
//! `{%...}` shows up verbatim.

use rand::rngs::StdRng;
use serde_json::{Number, Value};
use tracing::warn;

use crate::config::DrawConfig;
use crate::deck::{DeckDocument, PathLookup};
use crate::weight::WeightedPool;

/// Reference text that stands for the player's name.
pub const PLAYER_MARKER: &str = "$t玩家";

/// Resolves placeholders against one deck document.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    deck: &'a DeckDocument,
    config: &'a DrawConfig,
}

impl<'a> ReferenceResolver<'a> {
    /// Create a resolver for placeholders originating in `deck`.
    pub fn new(deck: &'a DeckDocument, config: &'a DrawConfig) -> Self {
        Self { deck, config }
    }

    /// Replace every `{%...}` placeholder in `content`.
    ///
    /// Never fails. A reference that cannot be resolved is replaced by a
    /// bracketed marker naming the missing segment or reference.
    pub fn resolve(&self, content: &str, rng: &mut StdRng) -> String {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("{%") {
            let after = &rest[start + 2..];
            match after.find('}') {
                // `{%}` is not a placeholder
                Some(0) => {
                    out.push_str(&rest[..start + 2]);
                    rest = after;
                }
                Some(end) => {
                    out.push_str(&rest[..start]);
                    out.push_str(&self.substitute(&after[..end], rng));
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }

        out.push_str(rest);
        out
    }

    fn substitute(&self, reference: &str, rng: &mut StdRng) -> String {
        if reference == PLAYER_MARKER {
            return self.config.player_word.clone();
        }

        let node = match self.deck.lookup(reference) {
            PathLookup::Found(node) => node,
            PathLookup::Missing(segment) => {
                warn!(reference, segment, "placeholder path segment missing");
                return self.config.missing_marker(segment);
            }
        };

        let value = match node {
            Value::Array(items) => WeightedPool::from_values(items)
                .pick(rng)
                .map(|entry| entry.content.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(render_number(n)),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Object(_) => None,
        };

        value.unwrap_or_else(|| {
            warn!(reference, "placeholder resolved to nothing drawable");
            self.config.not_found_marker(reference)
        })
    }
}

/// Integral floats print without a fractional part, so `1.0` reads as `1`.
fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Resolve placeholders in `content` against `deck` with default settings.
pub fn resolve(content: &str, deck: &DeckDocument, rng: &mut StdRng) -> String {
    let config = DrawConfig::default();
    ReferenceResolver::new(deck, &config).resolve(content, rng)
}
