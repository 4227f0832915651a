use itemsource::{
    GroupItems, GroupedItemsViewSource, ItemsCollection, ItemsSource, ItemsViewSource,
    SourceError, SourceFactory, SourceItem,
};

use crate::ItemsViewConfig;

/// The kind of view a position needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemViewType {
    Header,
    Footer,
    GroupHeader,
    GroupFooter,
    Item,
}

/// Owns the view configuration, the bound collection and the source currently answering for
/// them.
///
/// Adapters drive it by calling:
/// - `set_items_source` when the view's collection is replaced
/// - `set_config` when a view property changes
///
/// Either call disposes the active source, creates a new one through the factory and sends a
/// full reset to the factory's surface, unless nothing that shapes the source changed. Item
/// edits inside the bound collection reach the surface directly from the active source.
#[derive(Debug)]
pub struct ItemsAdapter<G, T> {
    factory: SourceFactory<G, T>,
    config: ItemsViewConfig,
    collection: Option<ItemsCollection<G>>,
    source: ItemsSource<G, T>,
}

impl<G, T> ItemsAdapter<G, T>
where
    G: GroupItems<T> + Clone + 'static,
    T: 'static,
{
    /// Starts out unbound: the active source is empty apart from header/footer slots.
    pub fn new(factory: SourceFactory<G, T>, config: ItemsViewConfig) -> Self {
        let source = factory.create(None, &config.source_options());
        Self {
            factory,
            config,
            collection: None,
            source,
        }
    }

    pub fn set_items_source(&mut self, collection: Option<ItemsCollection<G>>) {
        self.collection = collection;
        self.rebind();
    }

    pub fn set_config(&mut self, config: ItemsViewConfig) {
        let reshape = config.source_options() != self.config.source_options();
        self.config = config;
        if reshape {
            self.rebind();
        }
    }

    /// Replaces the active source with a fresh one for the current collection and config.
    pub fn rebind(&mut self) {
        self.source.dispose();
        let options = self.config.source_options();
        self.source = self.factory.create(self.collection.clone(), &options);
        adp_debug!(
            grouped = self.source.is_grouped(),
            count = self.source.count(),
            "ItemsAdapter::rebind"
        );
        self.factory.surface().notify_data_set_reset();
    }
}

impl<G, T> ItemsAdapter<G, T> {
    pub fn config(&self) -> &ItemsViewConfig {
        &self.config
    }

    pub fn collection(&self) -> Option<&ItemsCollection<G>> {
        self.collection.as_ref()
    }

    pub fn source(&self) -> &ItemsSource<G, T> {
        &self.source
    }

    pub fn item_count(&self) -> usize {
        self.source.count()
    }

    pub fn item(&self, position: usize) -> Result<SourceItem<G, T>, SourceError> {
        self.source.item_at(position)
    }

    /// `None` when the item is not in the active source.
    pub fn position_of(&self, item: &SourceItem<G, T>) -> Option<usize> {
        match self.source.position_of(item) {
            Ok(position) => Some(position),
            Err(err) => {
                adp_trace!(error = %err, "ItemsAdapter::position_of");
                None
            }
        }
    }

    /// `None` for positions past the end.
    pub fn item_view_type(&self, position: usize) -> Option<ItemViewType> {
        if position >= self.item_count() {
            return None;
        }
        let ty = if self.source.is_header(position) {
            ItemViewType::Header
        } else if self.source.is_footer(position) {
            ItemViewType::Footer
        } else if self.source.is_group_header(position) {
            ItemViewType::GroupHeader
        } else if self.source.is_group_footer(position) {
            ItemViewType::GroupFooter
        } else {
            ItemViewType::Item
        };
        Some(ty)
    }

    /// Releases the active source. The adapter reports no items until the next rebind.
    pub fn dispose(&mut self) {
        self.source.dispose();
    }
}
