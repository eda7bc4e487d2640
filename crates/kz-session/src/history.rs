//! Draw history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kz_core::DrawResult;

/// One recorded draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The command that produced the draw (`.draw <deck>`).
    pub command: String,
    /// The deck drawn from.
    pub deck: String,
    /// The resolved text.
    pub result: String,
    /// The entry as written in the deck.
    pub raw_entry: String,
    /// When the draw happened.
    pub timestamp: DateTime<Utc>,
}

impl From<&DrawResult> for HistoryEntry {
    fn from(draw: &DrawResult) -> Self {
        Self {
            command: format!(".draw {}", draw.deck_name),
            deck: draw.deck_name.clone(),
            result: draw.resolved_text.clone(),
            raw_entry: draw.raw_entry.clone(),
            timestamp: draw.timestamp,
        }
    }
}

/// Recent draws, newest first, capped at a fixed length.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl History {
    /// Create an empty history holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a draw. The oldest entry is dropped once the cap is reached.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Replace all entries (newest first), keeping at most the cap.
    pub fn replace(&mut self, mut entries: Vec<HistoryEntry>) {
        entries.truncate(self.limit);
        self.entries = entries;
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export the history as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Draw History\n============\n\n");
        for entry in &self.entries {
            out.push_str(&format!("[{}] {}\n", stamp(entry), entry.command));
            out.push_str(&format!("{}\n\n", entry.result));
        }
        out
    }

    /// Export the history as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Draw History\n\n");
        for entry in &self.entries {
            out.push_str(&format!("## {} ({})\n\n", entry.deck, stamp(entry)));
            out.push_str(&format!("`{}`\n\n", entry.command));
            for line in entry.result.lines() {
                out.push_str(&format!("> {line}\n"));
            }
            out.push('\n');
        }
        out
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

fn stamp(entry: &HistoryEntry) -> String {
    entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
