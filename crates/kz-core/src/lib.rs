//! Core types for Kartenzieher: deck documents, weighted selection,
//! placeholder resolution, and the draw engine.
//!
//! This crate is independent of how decks are fetched or where history is
//! stored. Hand a parsed JSON document to a [`DeckRegistry`] and draw from it
//! with a [`DrawEngine`].

/// Draw configuration (seed, marker words, batch limit).
pub mod config;
/// Deck documents and dot-path lookup.
pub mod deck;
/// The draw engine: pool location, selection, and resolution.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// In-memory registry of loaded decks.
pub mod registry;
/// `{%ref}` placeholder substitution.
pub mod resolver;
/// `::N::` weight prefixes and weighted random selection.
pub mod weight;

/// Re-export configuration.
pub use config::DrawConfig;
/// Re-export deck document types.
pub use deck::{DeckDocument, PathLookup};
/// Re-export engine types.
pub use engine::{DrawEngine, DrawResult};
/// Re-export error types.
pub use error::{DeckError, DeckResult};
/// Re-export the registry.
pub use registry::DeckRegistry;
/// Re-export the resolver.
pub use resolver::{PLAYER_MARKER, ReferenceResolver, resolve};
/// Re-export weighted selection.
pub use weight::{WeightedEntry, WeightedPool, select_weighted};
