//! Weight prefixes and weighted random selection.
//!
//! An entry written as `::3::Goblin` is three times as likely to be drawn as
//! a plain `Orc`. Selection walks cumulative weights instead of expanding
//! each entry `weight` times, which gives the same distribution.

use rand::Rng;
use rand::rngs::StdRng;
use serde_json::Value;
use tracing::warn;

use crate::error::{DeckError, DeckResult};

/// A raw deck entry split into its weight and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEntry<'a> {
    /// The entry exactly as written in the deck.
    pub raw: &'a str,
    /// Relative draw weight. Zero means the entry is never drawn.
    pub weight: u32,
    /// The text after the weight prefix.
    pub content: &'a str,
}

impl<'a> WeightedEntry<'a> {
    /// Parse an optional `::N::` prefix. Entries without one weigh 1.
    ///
    /// The content must fit on one line for the prefix to count; a
    /// multi-line entry starting with `::2::` is taken literally. Weights
    /// beyond `u32::MAX` saturate.
    pub fn parse(raw: &'a str) -> Self {
        parse_prefix(raw).unwrap_or(Self {
            raw,
            weight: 1,
            content: raw,
        })
    }
}

fn parse_prefix(raw: &str) -> Option<WeightedEntry<'_>> {
    let rest = raw.strip_prefix("::")?;
    let end = rest.find("::")?;
    let digits = &rest[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let content = &rest[end + 2..];
    if content.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return None;
    }
    Some(WeightedEntry {
        raw,
        weight: digits.parse().unwrap_or(u32::MAX),
        content,
    })
}

/// A pool of parsed entries ready for weighted drawing.
#[derive(Debug, Clone, Default)]
pub struct WeightedPool<'a> {
    entries: Vec<WeightedEntry<'a>>,
    total: u64,
}

impl<'a> WeightedPool<'a> {
    /// Build a pool from raw entry strings.
    pub fn new(raw: impl IntoIterator<Item = &'a str>) -> Self {
        let entries: Vec<WeightedEntry<'a>> = raw.into_iter().map(WeightedEntry::parse).collect();
        let total = entries.iter().map(|e| u64::from(e.weight)).sum();
        Self { entries, total }
    }

    /// Build a pool from a JSON array. Non-string items are skipped.
    pub fn from_values(items: &'a [Value]) -> Self {
        Self::new(items.iter().filter_map(|item| {
            let s = item.as_str();
            if s.is_none() {
                warn!(%item, "skipping non-string pool entry");
            }
            s
        }))
    }

    /// The parsed entries, in deck order.
    pub fn entries(&self) -> &[WeightedEntry<'a>] {
        &self.entries
    }

    /// Sum of all entry weights.
    pub fn total_weight(&self) -> u64 {
        self.total
    }

    /// Whether nothing in the pool can be drawn.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Draw one entry, or `None` if the pool is empty.
    pub fn pick(&self, rng: &mut StdRng) -> Option<&WeightedEntry<'a>> {
        if self.is_empty() {
            return None;
        }
        let mut roll = rng.random_range(0..self.total);
        for entry in &self.entries {
            let weight = u64::from(entry.weight);
            if roll < weight {
                return Some(entry);
            }
            roll -= weight;
        }
        None
    }
}

/// Draw the content of one entry from `entries`.
///
/// `pool` names the pool in the error when nothing can be drawn.
pub fn select_weighted<'a, S: AsRef<str>>(
    pool: &str,
    entries: &'a [S],
    rng: &mut StdRng,
) -> DeckResult<&'a str> {
    WeightedPool::new(entries.iter().map(|s| s.as_ref()))
        .pick(rng)
        .map(|entry| entry.content)
        .ok_or_else(|| DeckError::EmptyPool(pool.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn parse_plain_entry() {
        let e = WeightedEntry::parse("Goblin");
        assert_eq!(e.weight, 1);
        assert_eq!(e.content, "Goblin");
        assert_eq!(e.raw, "Goblin");
    }

    #[test]
    fn parse_weighted_entry() {
        let e = WeightedEntry::parse("::5::巨龙");
        assert_eq!(e.weight, 5);
        assert_eq!(e.content, "巨龙");
        assert_eq!(e.raw, "::5::巨龙");
    }

    #[test]
    fn parse_keeps_extra_colons_in_content() {
        let e = WeightedEntry::parse("::2:::x::y");
        assert_eq!(e.weight, 2);
        assert_eq!(e.content, ":x::y");
    }

    #[test]
    fn parse_empty_content() {
        let e = WeightedEntry::parse("::4::");
        assert_eq!(e.weight, 4);
        assert_eq!(e.content, "");
    }

    #[test]
    fn parse_rejects_malformed_prefixes() {
        for raw in ["::x::a", ":::a", "::::a", ":3::a", "::3:a", " ::3::a", "::-1::a"] {
            let e = WeightedEntry::parse(raw);
            assert_eq!(e.weight, 1, "{raw}");
            assert_eq!(e.content, raw);
        }
    }

    #[test]
    fn parse_multiline_content_is_literal() {
        let e = WeightedEntry::parse("::3::line one\nline two");
        assert_eq!(e.weight, 1);
        assert_eq!(e.content, "::3::line one\nline two");
    }

    #[test]
    fn parse_huge_weight_saturates() {
        let e = WeightedEntry::parse("::99999999999999999999::a");
        assert_eq!(e.weight, u32::MAX);
        assert_eq!(e.content, "a");
    }

    #[test]
    fn zero_weight_is_never_drawn() {
        let entries = ["::0::never", "always"];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            assert_eq!(select_weighted("p", &entries, &mut rng).unwrap(), "always");
        }
    }

    #[test]
    fn empty_pool_fails() {
        let mut rng = StdRng::seed_from_u64(42);
        let entries: [&str; 0] = [];
        assert_eq!(
            select_weighted("p", &entries, &mut rng),
            Err(DeckError::EmptyPool("p".to_string()))
        );
    }

    #[test]
    fn all_zero_weights_fail() {
        let mut rng = StdRng::seed_from_u64(42);
        let entries = ["::0::a", "::0::b"];
        assert!(matches!(
            select_weighted("p", &entries, &mut rng),
            Err(DeckError::EmptyPool(_))
        ));
    }

    #[test]
    fn uniform_pool_covers_every_entry() {
        let entries = ["a", "b", "c", "d", "e"];
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashMap::new();
        for _ in 0..1000 {
            let picked = select_weighted("p", &entries, &mut rng).unwrap();
            *seen.entry(picked).or_insert(0u32) += 1;
        }
        assert_eq!(seen.len(), entries.len());
        assert!(seen.keys().all(|k| entries.contains(k)));
    }

    #[test]
    fn weight_three_is_three_times_as_likely() {
        let entries = ["::3::Foo", "Bar"];
        let mut rng = StdRng::seed_from_u64(42);
        let mut foo = 0u32;
        let mut bar = 0u32;
        for _ in 0..40_000 {
            match select_weighted("p", &entries, &mut rng).unwrap() {
                "Foo" => foo += 1,
                "Bar" => bar += 1,
                other => panic!("unexpected pick {other}"),
            }
        }
        let ratio = f64::from(foo) / f64::from(bar);
        assert!((2.7..3.3).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn pool_from_values_skips_non_strings() {
        let items = json!(["a", 1, null, "::2::b", {"k": "v"}]);
        let pool = WeightedPool::from_values(items.as_array().unwrap());
        assert_eq!(pool.entries().len(), 2);
        assert_eq!(pool.total_weight(), 3);
        assert!(!pool.is_empty());
    }

    #[test]
    fn pick_returns_raw_entry() {
        let pool = WeightedPool::new(["::7::only"]);
        let mut rng = StdRng::seed_from_u64(1);
        let entry = pool.pick(&mut rng).unwrap();
        assert_eq!(entry.raw, "::7::only");
        assert_eq!(entry.content, "only");
    }

    proptest! {
        #[test]
        fn selection_stays_within_content_set(
            entries in proptest::collection::vec("[a-z]{1,8}", 1..20),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_weighted("p", &entries, &mut rng).unwrap();
            prop_assert!(entries.iter().any(|e| e == picked));
        }

        #[test]
        fn weighted_selection_returns_content_only(
            weighted in proptest::collection::vec((1u32..6, "[a-z]{1,6}"), 1..12),
            seed in any::<u64>(),
        ) {
            let raw: Vec<String> = weighted.iter().map(|(w, c)| format!("::{w}::{c}")).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_weighted("p", &raw, &mut rng).unwrap();
            prop_assert!(weighted.iter().any(|(_, c)| c == picked));
        }
    }
}
