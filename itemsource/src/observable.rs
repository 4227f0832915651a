use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::ops::Range;

use slotmap::SlotMap;

use crate::{
    ChangeFeed, ChangeHandler, CollectionChange, GroupItems, ItemList, ItemsCollection, SourceError,
    SubscriptionId,
};

/// A shared, interior-mutable list that raises a [`CollectionChange`] for every edit.
///
/// Wrap it in an `Rc` and hand it to a source via [`crate::ItemsCollection::observable`] (or
/// `ItemsCollection::from`). Handlers run synchronously after the edit is applied and after the
/// item borrow is released, so they may read the list. Handlers must not edit the list they are
/// being notified about.
pub struct ObservableVec<T> {
    items: RefCell<Vec<T>>,
    handlers: RefCell<SlotMap<SubscriptionId, ChangeHandler>>,
}

impl<T> ObservableVec<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: RefCell::new(items),
            handlers: RefCell::new(SlotMap::with_key()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Runs `f` with a read-only view of the current items.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.borrow().clone()
    }

    pub fn push(&self, item: T) {
        let index = {
            let mut items = self.items.borrow_mut();
            items.push(item);
            items.len() - 1
        };
        self.raise(CollectionChange::added(index, 1));
    }

    pub fn insert(&self, index: usize, item: T) -> Result<(), SourceError> {
        self.check_bound(index, self.len())?;
        self.items.borrow_mut().insert(index, item);
        self.raise(CollectionChange::added(index, 1));
        Ok(())
    }

    /// Inserts `items` starting at `index` and raises a single range notification.
    pub fn insert_range(
        &self,
        index: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<(), SourceError> {
        self.check_bound(index, self.len())?;
        let count = {
            let mut current = self.items.borrow_mut();
            let before = current.len();
            let tail = current.split_off(index);
            current.extend(items);
            let count = current.len() - before + tail.len();
            current.extend(tail);
            count
        };
        if count > 0 {
            self.raise(CollectionChange::added(index, count));
        }
        Ok(())
    }

    pub fn remove(&self, index: usize) -> Result<T, SourceError> {
        let len = self.len();
        if index >= len {
            return Err(SourceError::OutOfRange {
                position: index,
                count: len,
            });
        }
        let item = self.items.borrow_mut().remove(index);
        self.raise(CollectionChange::removed(Some(index), 1));
        Ok(item)
    }

    pub fn remove_range(&self, range: Range<usize>) -> Result<Vec<T>, SourceError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(SourceError::OutOfRange {
                position: range.end,
                count: len,
            });
        }
        let removed: Vec<T> = self.items.borrow_mut().drain(range.clone()).collect();
        if !removed.is_empty() {
            self.raise(CollectionChange::removed(Some(range.start), removed.len()));
        }
        Ok(removed)
    }

    /// Replaces the item at `index`, returning the previous one.
    pub fn replace(&self, index: usize, item: T) -> Result<T, SourceError> {
        let len = self.len();
        if index >= len {
            return Err(SourceError::OutOfRange {
                position: index,
                count: len,
            });
        }
        let old = core::mem::replace(&mut self.items.borrow_mut()[index], item);
        self.raise(CollectionChange::replaced(index, 1, 1));
        Ok(old)
    }

    /// Replaces `old_count` items starting at `index` with `items`.
    pub fn replace_range(
        &self,
        index: usize,
        old_count: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<Vec<T>, SourceError> {
        let len = self.len();
        let end = index.saturating_add(old_count);
        if end > len {
            return Err(SourceError::OutOfRange {
                position: end,
                count: len,
            });
        }
        let (old, new_count) = {
            let mut current = self.items.borrow_mut();
            let before = current.len();
            let old: Vec<T> = current.splice(index..end, items).collect();
            let new_count = current.len() + old.len() - before;
            (old, new_count)
        };
        self.raise(CollectionChange::replaced(index, old_count, new_count));
        Ok(old)
    }

    /// Moves the item at `from` so that it ends up at index `to`.
    pub fn move_item(&self, from: usize, to: usize) -> Result<(), SourceError> {
        let len = self.len();
        let out_of_range = if from >= len { from } else { to };
        if from >= len || to >= len {
            return Err(SourceError::OutOfRange {
                position: out_of_range,
                count: len,
            });
        }
        if from == to {
            return Ok(());
        }
        {
            let mut items = self.items.borrow_mut();
            let item = items.remove(from);
            items.insert(to, item);
        }
        self.raise(CollectionChange::moved(from, to, 1));
        Ok(())
    }

    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.raise(CollectionChange::reset());
    }

    /// Swaps in a whole new set of items and raises a reset.
    pub fn reset_with(&self, items: impl IntoIterator<Item = T>) {
        {
            let mut current = self.items.borrow_mut();
            current.clear();
            current.extend(items);
        }
        self.raise(CollectionChange::reset());
    }

    /// Dispatches `change` to every handler without touching the items.
    ///
    /// Use this to forward notifications from a foreign feed, including ones that do not carry
    /// a usable index.
    pub fn raise(&self, change: CollectionChange) {
        let handlers: Vec<(SubscriptionId, ChangeHandler)> = self
            .handlers
            .borrow()
            .iter()
            .map(|(id, handler)| (id, handler.clone()))
            .collect();
        for (id, handler) in handlers {
            // Skip handlers dropped by an earlier handler in this dispatch.
            if !self.handlers.borrow().contains_key(id) {
                continue;
            }
            handler(&change);
        }
    }

    fn check_bound(&self, index: usize, max: usize) -> Result<(), SourceError> {
        if index > max {
            return Err(SourceError::OutOfRange {
                position: index,
                count: self.len(),
            });
        }
        Ok(())
    }
}

impl<T> Default for ObservableVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ObservableVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for ObservableVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone> ItemList<T> for ObservableVec<T> {
    fn len(&self) -> usize {
        self.items.borrow().len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().as_slice().get(index).cloned()
    }
}

impl<T> ChangeFeed for ObservableVec<T> {
    fn subscribe(&self, handler: ChangeHandler) -> SubscriptionId {
        self.handlers.borrow_mut().insert(handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.handlers.borrow_mut().remove(id).is_some()
    }
}

impl<T: Clone + 'static> GroupItems<T> for Rc<ObservableVec<T>> {
    fn members(&self) -> ItemsCollection<T> {
        ItemsCollection::observable(Rc::clone(self))
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableVec")
            .field("items", &self.items.borrow())
            .field("subscribers", &self.handlers.borrow().len())
            .finish()
    }
}
