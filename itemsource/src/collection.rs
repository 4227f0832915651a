use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::CollectionChange;

slotmap::new_key_type! {
    /// Identifies one handler registered on a [`ChangeFeed`].
    pub struct SubscriptionId;
}

/// Callback invoked synchronously for every change a feed raises.
pub type ChangeHandler = Rc<dyn Fn(&CollectionChange)>;

/// Ordered random access over a backing collection.
///
/// Sources never cache what they read through this trait; every query goes back to the list so
/// it reflects the latest state at call time.
pub trait ItemList<T> {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<T>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A feed of change notifications.
pub trait ChangeFeed {
    fn subscribe(&self, handler: ChangeHandler) -> SubscriptionId;

    /// Returns `false` if `id` was not (or no longer) subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

impl<T: Clone> ItemList<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).cloned()
    }
}

impl<T: Clone> ItemList<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<T> {
        VecDeque::get(self, index).cloned()
    }
}

/// A list the caller may mutate without raising notifications.
impl<T: Clone> ItemList<T> for RefCell<Vec<T>> {
    fn len(&self) -> usize {
        self.borrow().len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.borrow().as_slice().get(index).cloned()
    }
}

/// A backing collection tagged with the capabilities it offers.
///
/// The factory picks a source variant from this tag rather than inspecting types at runtime.
pub enum ItemsCollection<T> {
    /// Random access only. Edits are never observed.
    Static(Rc<dyn ItemList<T>>),
    /// Random access plus a change feed.
    Observable {
        list: Rc<dyn ItemList<T>>,
        feed: Rc<dyn ChangeFeed>,
    },
}

impl<T> ItemsCollection<T> {
    pub fn fixed<L: ItemList<T> + 'static>(list: Rc<L>) -> Self {
        Self::Static(list)
    }

    pub fn observable<L: ItemList<T> + ChangeFeed + 'static>(list: Rc<L>) -> Self {
        let feed: Rc<dyn ChangeFeed> = list.clone();
        Self::Observable { list, feed }
    }

    pub fn list(&self) -> &Rc<dyn ItemList<T>> {
        match self {
            Self::Static(list) => list,
            Self::Observable { list, .. } => list,
        }
    }

    pub fn feed(&self) -> Option<&Rc<dyn ChangeFeed>> {
        match self {
            Self::Static(_) => None,
            Self::Observable { feed, .. } => Some(feed),
        }
    }

    pub fn is_observable(&self) -> bool {
        matches!(self, Self::Observable { .. })
    }
}

impl<T> Clone for ItemsCollection<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(list) => Self::Static(Rc::clone(list)),
            Self::Observable { list, feed } => Self::Observable {
                list: Rc::clone(list),
                feed: Rc::clone(feed),
            },
        }
    }
}

impl<T> fmt::Debug for ItemsCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_observable() {
            "Observable"
        } else {
            "Static"
        };
        f.debug_struct("ItemsCollection")
            .field("kind", &kind)
            .field("len", &self.list().len())
            .finish()
    }
}

impl<T: Clone + 'static> From<Vec<T>> for ItemsCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::fixed(Rc::new(items))
    }
}

/// Capability of a group value to expose its own member list.
pub trait GroupItems<T> {
    fn members(&self) -> ItemsCollection<T>;
}

/// A plain vector is a group of its own elements. Cloned on every rebuild.
impl<T: Clone + 'static> GroupItems<T> for Vec<T> {
    fn members(&self) -> ItemsCollection<T> {
        ItemsCollection::fixed(Rc::new(self.clone()))
    }
}

impl<T: Clone + 'static> GroupItems<T> for Rc<Vec<T>> {
    fn members(&self) -> ItemsCollection<T> {
        ItemsCollection::fixed(Rc::clone(self))
    }
}

/// A live registration on a [`ChangeFeed`].
///
/// The handler is unsubscribed exactly once: on [`Subscription::cancel`] or on drop, whichever
/// comes first.
pub struct Subscription {
    feed: Rc<dyn ChangeFeed>,
    id: Option<SubscriptionId>,
}

impl Subscription {
    pub fn new(feed: Rc<dyn ChangeFeed>, handler: ChangeHandler) -> Self {
        let id = feed.subscribe(handler);
        Self { feed, id: Some(id) }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Returns `true` if this call performed the unsubscription.
    pub fn cancel(&mut self) -> bool {
        match self.id.take() {
            Some(id) => self.feed.unsubscribe(id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
