//! In-memory registry of loaded decks.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::info;

use crate::deck::DeckDocument;

/// Maps deck names to their documents.
///
/// The registry never fetches anything itself. Callers hand it parsed
/// documents with [`put`](Self::put) or supply a fetch closure to
/// [`load_if_absent`](Self::load_if_absent).
#[derive(Debug, Clone, Default)]
pub struct DeckRegistry {
    decks: HashMap<String, DeckDocument>,
}

impl DeckRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a deck with this name is loaded.
    pub fn has(&self, name: &str) -> bool {
        self.decks.contains_key(name)
    }

    /// Get a loaded deck.
    pub fn get(&self, name: &str) -> Option<&DeckDocument> {
        self.decks.get(name)
    }

    /// Store a deck, replacing any previous document under the same name.
    pub fn put(&mut self, name: impl Into<String>, document: impl Into<DeckDocument>) {
        let name = name.into();
        info!(deck = %name, "deck registered");
        self.decks.insert(name, document.into());
    }

    /// Number of distinct loaded decks.
    pub fn count(&self) -> usize {
        self.decks.len()
    }

    /// Names of all loaded decks, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.decks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drop every loaded deck.
    pub fn clear(&mut self) {
        info!(count = self.decks.len(), "registry cleared");
        self.decks.clear();
    }

    /// Return the deck under `name`, calling `fetch` to load it first if it
    /// is not registered yet.
    ///
    /// A failed fetch leaves the registry unchanged.
    pub fn load_if_absent<E, F>(&mut self, name: &str, fetch: F) -> Result<&DeckDocument, E>
    where
        F: FnOnce(&str) -> Result<DeckDocument, E>,
    {
        match self.decks.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let document = fetch(name)?;
                info!(deck = name, "deck loaded");
                Ok(&*entry.insert(document))
            }
        }
    }
}
