use crate::SourceError;

/// Read access to a flat position space backed by a collection.
///
/// `count` and every query re-read the backing collection; nothing is cached between calls.
pub trait ItemsViewSource {
    type Item;

    /// Total addressable positions, reserved header/footer slots included.
    fn count(&self) -> usize;

    fn item_at(&self, position: usize) -> Result<Self::Item, SourceError>;

    /// The first position holding an item equal to `item`.
    fn position_of(&self, item: &Self::Item) -> Result<usize, SourceError>;

    fn is_header(&self, position: usize) -> bool;

    fn is_footer(&self, position: usize) -> bool;

    /// Drops change subscriptions. Calling it again is a no-op.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// A source whose position space is split into groups.
pub trait GroupedItemsViewSource: ItemsViewSource {
    fn is_group_header(&self, position: usize) -> bool;

    fn is_group_footer(&self, position: usize) -> bool;
}
