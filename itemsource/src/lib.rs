//! Keeps a virtualized list view in sync with an observable, optionally grouped collection.
//!
//! The rendering layer sees one flat position space. This crate maps that space onto the
//! backing data (a single list, or a list of groups with their own member lists), reserves
//! optional header/footer slots at the top level and around every group, and translates
//! collection change notifications into minimal structural edits (insert/remove/change a
//! position or a range) instead of full redraws.
//!
//! It is UI-agnostic. A view layer is expected to provide:
//! - the backing collections ([`ItemList`], optionally with a [`ChangeFeed`])
//! - a [`RenderSurface`] that receives the edit commands
//! - header/footer/grouping flags ([`SourceOptions`])
//!
//! Everything runs on one thread: notifications are delivered and translated synchronously,
//! before the mutating call returns.
//!
//! For view-level glue (re-binding on configuration changes, view types), see the
//! `itemsource-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod change;
mod collection;
mod error;
mod factory;
mod flat;
mod grouped;
mod observable;
mod options;
mod source;
mod surface;
mod types;


pub use change::{ChangeAction, CollectionChange};
pub use collection::{
    ChangeFeed, ChangeHandler, GroupItems, ItemList, ItemsCollection, Subscription,
    SubscriptionId,
};
pub use error::SourceError;
pub use factory::{ItemsSource, SourceFactory, create_list_source};
pub use flat::{FlatSource, ListSource, ObservableSource, translate_change};
pub use grouped::GroupedSource;
pub use observable::ObservableVec;
pub use options::{Comparer, SourceOptions};
pub use source::{GroupedItemsViewSource, ItemsViewSource};
pub use surface::{CommandLog, EditCommand, RenderSurface};
pub use types::SourceItem;
