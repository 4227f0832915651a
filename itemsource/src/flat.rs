use alloc::rc::Rc;
use core::fmt;

use crate::{
    ChangeAction, ChangeFeed, ChangeHandler, CollectionChange, Comparer, EditCommand,
    ItemList, ItemsViewSource, RenderSurface, SourceError, SourceOptions, Subscription,
};

/// A read-only position-space view over one collection, with optional header/footer slots.
///
/// `position = index + has_header`. Positions `0` (header) and `count - 1` (footer) do not map
/// to items.
pub struct FlatSource<T> {
    list: Rc<dyn ItemList<T>>,
    has_header: bool,
    has_footer: bool,
    eq: Comparer<T>,
    disposed: bool,
}

impl<T> FlatSource<T> {
    pub fn new(list: Rc<dyn ItemList<T>>, options: &SourceOptions) -> Self
    where
        T: PartialEq + 'static,
    {
        Self::with_comparer(list, options, Comparer::by_eq())
    }

    pub fn with_comparer(
        list: Rc<dyn ItemList<T>>,
        options: &SourceOptions,
        eq: Comparer<T>,
    ) -> Self {
        Self {
            list,
            has_header: options.has_header,
            has_footer: options.has_footer,
            eq,
            disposed: false,
        }
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    pub fn has_footer(&self) -> bool {
        self.has_footer
    }

    pub fn list(&self) -> &Rc<dyn ItemList<T>> {
        &self.list
    }

    fn header_slots(&self) -> usize {
        usize::from(self.has_header)
    }
}

impl<T> ItemsViewSource for FlatSource<T> {
    type Item = T;

    fn count(&self) -> usize {
        if self.disposed {
            return 0;
        }
        self.list.len() + self.header_slots() + usize::from(self.has_footer)
    }

    fn item_at(&self, position: usize) -> Result<T, SourceError> {
        if self.disposed {
            return Err(SourceError::Disposed);
        }
        let count = self.count();
        let out_of_range = SourceError::OutOfRange { position, count };
        if position < self.header_slots() || position >= count - usize::from(self.has_footer) {
            return Err(out_of_range);
        }
        self.list
            .get(position - self.header_slots())
            .ok_or(out_of_range)
    }

    fn position_of(&self, item: &T) -> Result<usize, SourceError> {
        if self.disposed {
            return Err(SourceError::Disposed);
        }
        (0..self.list.len())
            .find(|&index| {
                self.list
                    .get(index)
                    .is_some_and(|candidate| self.eq.equals(&candidate, item))
            })
            .map(|index| index + self.header_slots())
            .ok_or(SourceError::NotFound)
    }

    fn is_header(&self, position: usize) -> bool {
        self.has_header && position == 0
    }

    fn is_footer(&self, position: usize) -> bool {
        self.has_footer && self.count().checked_sub(1) == Some(position)
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<T> fmt::Debug for FlatSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatSource")
            .field("len", &self.list.len())
            .field("has_header", &self.has_header)
            .field("has_footer", &self.has_footer)
            .field("disposed", &self.disposed)
            .finish()
    }
}

/// Translates a change on an unheadered collection into the command for a position space that
/// starts `offset` positions earlier.
///
/// Any change that does not carry the index it needs falls back to [`EditCommand::Reset`];
/// the list is never searched, since a search cannot tell duplicate items apart. So does a
/// change whose positions do not fit in `usize`. Returns `None` for changes that touch no
/// positions (e.g. adding zero items).
pub fn translate_change(change: &CollectionChange, offset: usize) -> Option<EditCommand> {
    let shift = |index: Option<usize>| index.and_then(|index| index.checked_add(offset));
    let command = match change.action {
        ChangeAction::Add => shift(change.new_start)
            .map(|position| EditCommand::inserted(position, change.new_count)),
        ChangeAction::Remove => shift(change.old_start)
            .map(|position| EditCommand::removed(position, change.old_count)),
        ChangeAction::Replace if change.old_count != change.new_count => None,
        ChangeAction::Replace => shift(change.new_start.or(change.old_start))
            .map(|position| EditCommand::changed(position, change.new_count)),
        ChangeAction::Move => match (change.old_start, change.new_start) {
            (Some(old), Some(new)) => {
                // Coarse: every position between the two slots is reported as changed.
                let start = old.min(new);
                old.max(new)
                    .checked_add(change.new_count)
                    .zip(shift(Some(start)))
                    .map(|(end, position)| EditCommand::changed(position, end - start))
            }
            _ => None,
        },
        ChangeAction::Reset => None,
    };
    command.unwrap_or(Some(EditCommand::Reset))
}

/// A [`FlatSource`] that forwards its collection's change notifications to a
/// [`RenderSurface`] as position-space commands.
pub struct ObservableSource<T> {
    flat: FlatSource<T>,
    subscription: Option<Subscription>,
}

impl<T> ObservableSource<T> {
    /// Builds the source and subscribes to `feed` immediately.
    pub fn new(
        list: Rc<dyn ItemList<T>>,
        feed: Rc<dyn ChangeFeed>,
        options: &SourceOptions,
        eq: Comparer<T>,
        surface: Rc<dyn RenderSurface>,
    ) -> Self
    where
        T: 'static,
    {
        let flat = FlatSource::with_comparer(list, options, eq);
        let offset = flat.header_slots();
        let slots = offset + usize::from(flat.has_footer);
        let list = Rc::clone(&flat.list);
        let handler: ChangeHandler = Rc::new(move |change: &CollectionChange| {
            let Some(mut command) = translate_change(change, offset) else {
                return;
            };
            // The edit is already applied, so the list length is the post-edit one.
            if !command.fits(list.len() + slots) {
                command = EditCommand::Reset;
            }
            if command == EditCommand::Reset && change.action != ChangeAction::Reset {
                src_warn!(
                    action = ?change.action,
                    old_count = change.old_count,
                    new_count = change.new_count,
                    "change cannot be applied incrementally or lies out of bounds, resetting"
                );
            } else {
                src_trace!(action = ?change.action, command = ?command, "collection changed");
            }
            command.apply(&*surface);
        });
        src_debug!(
            len = flat.list.len(),
            has_header = flat.has_header,
            has_footer = flat.has_footer,
            "ObservableSource::new"
        );
        Self {
            flat,
            subscription: Some(Subscription::new(feed, handler)),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn flat(&self) -> &FlatSource<T> {
        &self.flat
    }
}

impl<T> ItemsViewSource for ObservableSource<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.flat.count()
    }

    fn item_at(&self, position: usize) -> Result<T, SourceError> {
        self.flat.item_at(position)
    }

    fn position_of(&self, item: &T) -> Result<usize, SourceError> {
        self.flat.position_of(item)
    }

    fn is_header(&self, position: usize) -> bool {
        self.flat.is_header(position)
    }

    fn is_footer(&self, position: usize) -> bool {
        self.flat.is_footer(position)
    }

    fn dispose(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
            src_debug!("ObservableSource::dispose");
        }
        self.flat.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.flat.is_disposed()
    }
}

impl<T> fmt::Debug for ObservableSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableSource")
            .field("flat", &self.flat)
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}

/// A source over a single, non-grouped collection: static or change-tracked.
#[derive(Debug)]
pub enum ListSource<T> {
    Static(FlatSource<T>),
    Observable(ObservableSource<T>),
}

impl<T> ListSource<T> {
    pub fn is_observable(&self) -> bool {
        matches!(self, Self::Observable(_))
    }
}

impl<T> ItemsViewSource for ListSource<T> {
    type Item = T;

    fn count(&self) -> usize {
        match self {
            Self::Static(s) => s.count(),
            Self::Observable(s) => s.count(),
        }
    }

    fn item_at(&self, position: usize) -> Result<T, SourceError> {
        match self {
            Self::Static(s) => s.item_at(position),
            Self::Observable(s) => s.item_at(position),
        }
    }

    fn position_of(&self, item: &T) -> Result<usize, SourceError> {
        match self {
            Self::Static(s) => s.position_of(item),
            Self::Observable(s) => s.position_of(item),
        }
    }

    fn is_header(&self, position: usize) -> bool {
        match self {
            Self::Static(s) => s.is_header(position),
            Self::Observable(s) => s.is_header(position),
        }
    }

    fn is_footer(&self, position: usize) -> bool {
        match self {
            Self::Static(s) => s.is_footer(position),
            Self::Observable(s) => s.is_footer(position),
        }
    }

    fn dispose(&mut self) {
        match self {
            Self::Static(s) => s.dispose(),
            Self::Observable(s) => s.dispose(),
        }
    }

    fn is_disposed(&self) -> bool {
        match self {
            Self::Static(s) => s.is_disposed(),
            Self::Observable(s) => s.is_disposed(),
        }
    }
}
