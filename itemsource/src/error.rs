/// Errors surfaced by sources and observable collections.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// A position or index outside the valid bounds, or a position that addresses a reserved
    /// header/footer slot where an item was expected.
    ///
    /// This is always a caller contract violation; it is never clamped.
    #[error("position {position} is out of range (count {count})")]
    OutOfRange { position: usize, count: usize },

    /// An item-to-position lookup found nothing. Treat as "no current position".
    #[error("item not found in source")]
    NotFound,

    /// A change notification carried a kind outside Add/Remove/Replace/Move/Reset.
    #[error("unrecognized collection change kind: {0}")]
    UnrecognizedChangeKind(i32),

    /// The source was queried after `dispose`.
    #[error("source has been disposed")]
    Disposed,
}

impl SourceError {
    /// Returns `true` for the "no current position" outcome of a lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
