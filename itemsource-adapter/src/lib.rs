//! Adapter glue for the `itemsource` crate.
//!
//! `itemsource` decides which structural edit a list view must apply and where. This crate is
//! the boundary a UI adapter sits on:
//!
//! - View configuration (grouping, header/footer and group template flags)
//! - Re-binding the active source when the collection or its shape-affecting config changes
//! - Count, item and view-type queries delegated to whichever source is active
//!
//! No UI objects live here; the rendering surface is whatever implements
//! [`itemsource::RenderSurface`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod config;


pub use adapter::{ItemViewType, ItemsAdapter};
pub use config::ItemsViewConfig;
