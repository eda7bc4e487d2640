//! Deck documents.
//!
//! A deck is a JSON object. Array values are drawable pools, nested objects
//! are sub-tables, and strings are leaf values that placeholders can point
//! at. Key order is the order of declaration in the source file, which
//! matters when the engine has to pick a default pool.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed deck document.
///
/// The document is stored as loaded. Whether it is a well-formed table is
/// only checked when drawing from it, so a registry can hold anything the
/// loader produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckDocument(Value);

/// Result of walking a dot path through a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathLookup<'a, 'p> {
    /// Every segment resolved; this is the final node.
    Found(&'a Value),
    /// This segment was absent, empty, or its parent was not indexable.
    Missing(&'p str),
}

impl DeckDocument {
    /// Wrap an already-parsed JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self)
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The top-level table, if the document is an object.
    pub fn table(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    /// All array-valued top-level keys, in declaration order.
    pub fn pools(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.table()
            .into_iter()
            .flat_map(|table| table.iter())
            .filter_map(|(key, value)| value.as_array().map(|items| (key.as_str(), items.as_slice())))
    }

    /// Walk a dot-separated path (`a.b.c`) from the document root.
    ///
    /// Objects are indexed by key and arrays by decimal position. A segment
    /// whose value is null, `false`, zero, or an empty string counts as
    /// missing.
    pub fn lookup<'a, 'p>(&'a self, path: &'p str) -> PathLookup<'a, 'p> {
        let mut node = &self.0;
        for segment in path.split('.') {
            match child(node, segment).filter(|next| is_truthy(next)) {
                Some(next) => node = next,
                None => return PathLookup::Missing(segment),
            }
        }
        PathLookup::Found(node)
    }
}

impl From<Value> for DeckDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(table) => table.get(segment),
        Value::Array(items) => {
            let index: usize = segment.parse().ok()?;
            // "01" and "+1" are keys, not positions
            if index.to_string() != segment {
                return None;
            }
            items.get(index)
        }
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
