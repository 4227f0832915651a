use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::factory::create_list_source;
use crate::{
    ChangeAction, ChangeHandler, CollectionChange, Comparer, EditCommand, GroupItems,
    GroupedItemsViewSource, ItemsCollection, ItemsViewSource, ListSource, RenderSurface,
    SourceError, SourceItem, SourceOptions, Subscription,
};

/// Composes one source per group into a single position space.
///
/// Layout: `[header] (group 0) (group 1) ... [footer]`, where each group is
/// `[group header] members [group footer]`.
///
/// Edits inside a group are forwarded by that group's own source, offset to the group's current
/// start. Any edit to the group list itself rebuilds every per-group source (see
/// [`GroupedSource::rebuild`]) before the edit is reported.
pub struct GroupedSource<G, T> {
    state: Rc<GroupedState<G, T>>,
    group_eq: Comparer<G>,
    subscription: Option<Subscription>,
    disposed: bool,
}

struct GroupedState<G, T> {
    groups: ItemsCollection<G>,
    options: SourceOptions,
    member_eq: Comparer<T>,
    surface: Rc<dyn RenderSurface>,
    tracks: RefCell<Vec<ListSource<T>>>,
    this: Weak<GroupedState<G, T>>,
}

/// Relays a group's commands into the parent position space.
struct GroupSurface<G, T> {
    state: Weak<GroupedState<G, T>>,
    ordinal: usize,
}

impl<G, T> GroupedSource<G, T>
where
    G: GroupItems<T> + 'static,
    T: 'static,
{
    pub fn new(
        groups: ItemsCollection<G>,
        options: &SourceOptions,
        surface: Rc<dyn RenderSurface>,
    ) -> Self
    where
        G: PartialEq,
        T: PartialEq,
    {
        Self::with_comparers(
            groups,
            options,
            Comparer::by_eq(),
            Comparer::by_eq(),
            surface,
        )
    }

    pub fn with_comparers(
        groups: ItemsCollection<G>,
        options: &SourceOptions,
        group_eq: Comparer<G>,
        member_eq: Comparer<T>,
        surface: Rc<dyn RenderSurface>,
    ) -> Self {
        let state = Rc::new_cyclic(|this| GroupedState {
            groups,
            options: *options,
            member_eq,
            surface,
            tracks: RefCell::new(Vec::new()),
            this: this.clone(),
        });

        let subscription = state.groups.feed().map(|feed| {
            let weak = Rc::downgrade(&state);
            let handler: ChangeHandler = Rc::new(move |change: &CollectionChange| {
                if let Some(state) = weak.upgrade() {
                    state.on_groups_changed(change);
                }
            });
            Subscription::new(Rc::clone(feed), handler)
        });

        state.reset_group_tracking();
        src_debug!(
            groups = state.tracks.borrow().len(),
            observable = subscription.is_some(),
            "GroupedSource::new"
        );

        Self {
            state,
            group_eq,
            subscription,
            disposed: false,
        }
    }

    /// Throws away every per-group source and builds a fresh, index-aligned set.
    ///
    /// This runs on every edit to the group list, because inserting or removing a group shifts
    /// the offsets of all groups after it.
    pub fn rebuild(&self) {
        if self.disposed {
            return;
        }
        self.state.reset_group_tracking();
    }
}

impl<G, T> GroupedSource<G, T> {
    pub fn options(&self) -> &SourceOptions {
        &self.state.options
    }

    /// Number of groups currently tracked.
    pub fn group_count(&self) -> usize {
        self.state.tracks.borrow().len()
    }

    /// Position of the first slot of group `index` (its header slot when group headers are on).
    pub fn group_start(&self, index: usize) -> Option<usize> {
        (index < self.group_count()).then(|| self.state.group_start(index))
    }

    /// Resolves a position to `(group index, position inside the group)`.
    ///
    /// Returns `None` for the top-level header/footer and for positions past the end.
    pub fn locate(&self, position: usize) -> Option<(usize, usize)> {
        if self.is_header(position) || self.is_footer(position) {
            return None;
        }
        self.state.locate(position)
    }

    pub fn position_of_group(&self, group: &G) -> Result<usize, SourceError> {
        if self.disposed {
            return Err(SourceError::Disposed);
        }
        let groups = self.state.groups.list();
        (0..groups.len().min(self.group_count()))
            .find(|&index| {
                groups
                    .get(index)
                    .is_some_and(|candidate| self.group_eq.equals(&candidate, group))
            })
            .map(|index| self.state.group_start(index))
            .ok_or(SourceError::NotFound)
    }

    pub fn position_of_member(&self, item: &T) -> Result<usize, SourceError> {
        if self.disposed {
            return Err(SourceError::Disposed);
        }
        let tracks = self.state.tracks.borrow();
        let mut offset = self.state.options.header_slots();
        for track in tracks.iter() {
            match track.position_of(item) {
                Ok(local) => return Ok(offset + local),
                Err(SourceError::NotFound) => offset += track.count(),
                Err(err) => return Err(err),
            }
        }
        Err(SourceError::NotFound)
    }

    fn group_at(&self, index: usize) -> Result<G, SourceError> {
        self.state
            .groups
            .list()
            .get(index)
            .ok_or(SourceError::OutOfRange {
                position: index,
                count: self.state.groups.list().len(),
            })
    }
}

impl<G, T> ItemsViewSource for GroupedSource<G, T> {
    type Item = SourceItem<G, T>;

    fn count(&self) -> usize {
        if self.disposed {
            return 0;
        }
        self.state.count()
    }

    fn item_at(&self, position: usize) -> Result<SourceItem<G, T>, SourceError> {
        if self.disposed {
            return Err(SourceError::Disposed);
        }
        let count = self.count();
        if position >= count {
            return Err(SourceError::OutOfRange { position, count });
        }
        if self.is_header(position) {
            return Ok(SourceItem::Header);
        }
        if self.is_footer(position) {
            return Ok(SourceItem::Footer);
        }
        let (group, local) = self
            .state
            .locate(position)
            .ok_or(SourceError::OutOfRange { position, count })?;

        let tracks = self.state.tracks.borrow();
        let track = &tracks[group];
        if track.is_header(local) {
            return Ok(SourceItem::GroupHeader(self.group_at(group)?));
        }
        if track.is_footer(local) {
            return Ok(SourceItem::GroupFooter(self.group_at(group)?));
        }
        track.item_at(local).map(SourceItem::Member)
    }

    fn position_of(&self, item: &SourceItem<G, T>) -> Result<usize, SourceError> {
        if self.disposed {
            return Err(SourceError::Disposed);
        }
        match item {
            SourceItem::Header if self.state.options.has_header => Ok(0),
            SourceItem::Footer if self.state.options.has_footer => Ok(self.count() - 1),
            // Rows of an ungrouped source never occupy a grouped position.
            SourceItem::Header | SourceItem::Footer | SourceItem::Entry(_) => {
                Err(SourceError::NotFound)
            }
            SourceItem::GroupHeader(group) => {
                if !self.state.options.has_group_headers {
                    return Err(SourceError::NotFound);
                }
                self.position_of_group(group)
            }
            SourceItem::GroupFooter(group) => {
                if !self.state.options.has_group_footers {
                    return Err(SourceError::NotFound);
                }
                let start = self.position_of_group(group)?;
                let index = self
                    .state
                    .locate(start)
                    .map(|(index, _)| index)
                    .ok_or(SourceError::NotFound)?;
                Ok(start + self.state.tracks.borrow()[index].count() - 1)
            }
            SourceItem::Member(item) => self.position_of_member(item),
        }
    }

    fn is_header(&self, position: usize) -> bool {
        self.state.options.has_header && position == 0
    }

    fn is_footer(&self, position: usize) -> bool {
        self.state.options.has_footer && self.count().checked_sub(1) == Some(position)
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.state.clear_group_tracking();
        src_debug!("GroupedSource::dispose");
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<G, T> GroupedItemsViewSource for GroupedSource<G, T> {
    fn is_group_header(&self, position: usize) -> bool {
        self.locate(position)
            .is_some_and(|(group, local)| self.state.tracks.borrow()[group].is_header(local))
    }

    fn is_group_footer(&self, position: usize) -> bool {
        self.locate(position)
            .is_some_and(|(group, local)| self.state.tracks.borrow()[group].is_footer(local))
    }
}

impl<G, T> fmt::Debug for GroupedSource<G, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedSource")
            .field("groups", &self.group_count())
            .field("count", &self.count())
            .field("options", &self.state.options)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl<G, T> GroupedState<G, T> {
    fn count(&self) -> usize {
        let members: usize = self.tracks.borrow().iter().map(|t| t.count()).sum();
        self.options.header_slots() + members + self.options.footer_slots()
    }

    fn group_start(&self, ordinal: usize) -> usize {
        let preceding: usize = self
            .tracks
            .borrow()
            .iter()
            .take(ordinal)
            .map(|t| t.count())
            .sum();
        self.options.header_slots() + preceding
    }

    /// `(first position, number of positions)` covered by `len` groups starting at `first`.
    fn span(&self, first: usize, len: usize) -> Option<(usize, usize)> {
        let tracks = self.tracks.borrow();
        let end = first.checked_add(len)?;
        if end > tracks.len() {
            return None;
        }
        let covered: usize = tracks[first..end].iter().map(|t| t.count()).sum();
        drop(tracks);
        Some((self.group_start(first), covered))
    }

    fn locate(&self, position: usize) -> Option<(usize, usize)> {
        let mut remaining = position.checked_sub(self.options.header_slots())?;
        for (group, track) in self.tracks.borrow().iter().enumerate() {
            let len = track.count();
            if remaining < len {
                return Some((group, remaining));
            }
            remaining -= len;
        }
        None
    }

    fn clear_group_tracking(&self) {
        let mut old = core::mem::take(&mut *self.tracks.borrow_mut());
        while let Some(mut track) = old.pop() {
            track.dispose();
        }
    }
}

impl<G, T> GroupedState<G, T>
where
    G: GroupItems<T> + 'static,
    T: 'static,
{
    fn reset_group_tracking(&self) {
        self.clear_group_tracking();

        let groups = self.groups.list();
        let group_options = self.options.for_group();
        let mut tracks = Vec::with_capacity(groups.len());
        for ordinal in 0..groups.len() {
            let Some(group) = groups.get(ordinal) else {
                break;
            };
            let surface: Rc<dyn RenderSurface> = Rc::new(GroupSurface {
                state: self.this.clone(),
                ordinal,
            });
            tracks.push(create_list_source(
                group.members(),
                &group_options,
                self.member_eq.clone(),
                surface,
            ));
        }
        src_trace!(groups = tracks.len(), "group tracking rebuilt");
        *self.tracks.borrow_mut() = tracks;
    }

    fn on_groups_changed(&self, change: &CollectionChange) {
        let command = self.apply_group_change(change);
        match command {
            Some(EditCommand::Reset) if change.action != ChangeAction::Reset => {
                src_warn!(
                    action = ?change.action,
                    old_count = change.old_count,
                    new_count = change.new_count,
                    "group change cannot be applied incrementally, resetting"
                );
            }
            _ => {
                src_trace!(action = ?change.action, command = ?command, "groups changed");
            }
        }
        if let Some(command) = command {
            command.apply(&*self.surface);
        }
    }

    /// Rebuilds group tracking and works out the command covering the affected groups.
    ///
    /// Ranges span the positions the affected groups actually occupy (members and group
    /// slots), measured before the rebuild for removals and after it for insertions.
    fn apply_group_change(&self, change: &CollectionChange) -> Option<EditCommand> {
        match change.action {
            ChangeAction::Add => {
                self.reset_group_tracking();
                let Some(first) = change.new_start else {
                    return Some(EditCommand::Reset);
                };
                match self.span(first, change.new_count) {
                    Some((position, len)) => EditCommand::inserted(position, len),
                    None => Some(EditCommand::Reset),
                }
            }
            ChangeAction::Remove => {
                let before = change
                    .old_start
                    .and_then(|first| self.span(first, change.old_count));
                self.reset_group_tracking();
                match before {
                    Some((position, len)) => EditCommand::removed(position, len),
                    None => Some(EditCommand::Reset),
                }
            }
            ChangeAction::Replace => {
                let first = change.new_start.or(change.old_start);
                let before = first.and_then(|first| self.span(first, change.old_count));
                self.reset_group_tracking();
                if change.old_count != change.new_count {
                    return Some(EditCommand::Reset);
                }
                let after = first.and_then(|first| self.span(first, change.new_count));
                match (before, after) {
                    (Some((position, old_len)), Some((_, new_len))) if old_len == new_len => {
                        EditCommand::changed(position, new_len)
                    }
                    _ => Some(EditCommand::Reset),
                }
            }
            ChangeAction::Move => {
                self.reset_group_tracking();
                let (Some(old), Some(new)) = (change.old_start, change.new_start) else {
                    return Some(EditCommand::Reset);
                };
                let first = old.min(new);
                let end = old.max(new) + change.new_count;
                match self.span(first, end - first) {
                    Some((position, len)) => EditCommand::changed(position, len),
                    None => Some(EditCommand::Reset),
                }
            }
            ChangeAction::Reset => {
                self.reset_group_tracking();
                Some(EditCommand::Reset)
            }
        }
    }
}

impl<G, T> GroupSurface<G, T> {
    fn relay(&self, command: EditCommand) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        if command == EditCommand::Reset {
            command.apply(&*state.surface);
            return;
        }
        let offset = state.group_start(self.ordinal);
        command.shifted(offset).apply(&*state.surface);
    }
}

impl<G, T> RenderSurface for GroupSurface<G, T> {
    fn notify_item_inserted(&self, position: usize) {
        self.relay(EditCommand::ItemInserted { position });
    }

    fn notify_range_inserted(&self, position: usize, count: usize) {
        self.relay(EditCommand::RangeInserted { position, count });
    }

    fn notify_item_removed(&self, position: usize) {
        self.relay(EditCommand::ItemRemoved { position });
    }

    fn notify_range_removed(&self, position: usize, count: usize) {
        self.relay(EditCommand::RangeRemoved { position, count });
    }

    fn notify_item_changed(&self, position: usize) {
        self.relay(EditCommand::ItemChanged { position });
    }

    fn notify_range_changed(&self, position: usize, count: usize) {
        self.relay(EditCommand::RangeChanged { position, count });
    }

    fn notify_data_set_reset(&self) {
        self.relay(EditCommand::Reset);
    }
}
