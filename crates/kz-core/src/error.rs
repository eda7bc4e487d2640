/// Alias for `Result<T, DeckError>`.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors that can occur when drawing from a deck.
///
/// Unresolvable placeholders are not errors; they degrade to inline markers
/// in the drawn text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    /// No deck with this name is registered.
    #[error("unknown deck: \"{0}\"")]
    UnknownDeck(String),

    /// No pool could be located, or the located pool has nothing to draw.
    #[error("no drawable entries in \"{0}\"")]
    EmptyPool(String),

    /// The deck document is not a JSON object.
    #[error("malformed deck \"{0}\": document is not an object")]
    MalformedDeck(String),
}
