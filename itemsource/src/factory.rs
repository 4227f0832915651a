use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use crate::{
    Comparer, FlatSource, GroupItems, GroupedItemsViewSource, GroupedSource, ItemsCollection,
    ItemsViewSource, ListSource, ObservableSource, RenderSurface, SourceError, SourceItem,
    SourceOptions,
};

/// Picks the flat source variant a collection's capabilities call for.
pub fn create_list_source<T: 'static>(
    collection: ItemsCollection<T>,
    options: &SourceOptions,
    eq: Comparer<T>,
    surface: Rc<dyn RenderSurface>,
) -> ListSource<T> {
    match collection {
        ItemsCollection::Static(list) => {
            ListSource::Static(FlatSource::with_comparer(list, options, eq))
        }
        ItemsCollection::Observable { list, feed } => {
            ListSource::Observable(ObservableSource::new(list, feed, options, eq, surface))
        }
    }
}

/// Creates sources for collections bound to a view.
///
/// Holds the rendering surface every created source reports to, plus the equality used for
/// top-level entries (`G`) and group members (`T`).
pub struct SourceFactory<G, T> {
    surface: Rc<dyn RenderSurface>,
    entry_eq: Comparer<G>,
    member_eq: Comparer<T>,
}

impl<G, T> SourceFactory<G, T> {
    pub fn new(surface: Rc<dyn RenderSurface>) -> Self
    where
        G: PartialEq + 'static,
        T: PartialEq + 'static,
    {
        Self {
            surface,
            entry_eq: Comparer::by_eq(),
            member_eq: Comparer::by_eq(),
        }
    }

    /// For entry or member types without `PartialEq`, such as `Rc<ObservableVec<_>>` groups.
    pub fn with_comparers(
        surface: Rc<dyn RenderSurface>,
        entry_eq: Comparer<G>,
        member_eq: Comparer<T>,
    ) -> Self {
        Self {
            surface,
            entry_eq,
            member_eq,
        }
    }

    pub fn with_entry_comparer(mut self, eq: Comparer<G>) -> Self {
        self.entry_eq = eq;
        self
    }

    pub fn with_member_comparer(mut self, eq: Comparer<T>) -> Self {
        self.member_eq = eq;
        self
    }

    pub fn surface(&self) -> &Rc<dyn RenderSurface> {
        &self.surface
    }

    /// A static or change-tracked source over a non-grouped collection.
    pub fn create_list(
        &self,
        collection: ItemsCollection<G>,
        options: &SourceOptions,
    ) -> ListSource<G>
    where
        G: 'static,
    {
        create_list_source(
            collection,
            options,
            self.entry_eq.clone(),
            Rc::clone(&self.surface),
        )
    }

    /// Selects and builds the source for `collection`:
    /// - no collection: an empty static source
    /// - `options.grouped`: a [`GroupedSource`]
    /// - otherwise: static or observable by the collection's capabilities
    pub fn create(
        &self,
        collection: Option<ItemsCollection<G>>,
        options: &SourceOptions,
    ) -> ItemsSource<G, T>
    where
        G: GroupItems<T> + Clone + 'static,
        T: 'static,
    {
        let Some(collection) = collection else {
            src_debug!("SourceFactory::create: no collection bound");
            let empty: Rc<Vec<G>> = Rc::new(Vec::new());
            return ItemsSource::Static(FlatSource::with_comparer(
                empty,
                options,
                self.entry_eq.clone(),
            ));
        };

        if options.grouped {
            src_debug!(
                observable = collection.is_observable(),
                "SourceFactory::create: grouped"
            );
            return ItemsSource::Grouped(GroupedSource::with_comparers(
                collection,
                options,
                self.entry_eq.clone(),
                self.member_eq.clone(),
                Rc::clone(&self.surface),
            ));
        }

        match self.create_list(collection, options) {
            ListSource::Static(source) => ItemsSource::Static(source),
            ListSource::Observable(source) => ItemsSource::Observable(source),
        }
    }
}

impl<G, T> fmt::Debug for SourceFactory<G, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFactory").finish_non_exhaustive()
    }
}

/// The source bound to a view: one of the three variants the factory can produce.
///
/// Positions resolve to [`SourceItem`]s. For the flat variants, rows are
/// [`SourceItem::Entry`] and the header/footer slots resolve to the
/// [`SourceItem::Header`]/[`SourceItem::Footer`] sentinels.
#[derive(Debug)]
pub enum ItemsSource<G, T = G> {
    Static(FlatSource<G>),
    Observable(ObservableSource<G>),
    Grouped(GroupedSource<G, T>),
}

impl<G, T> ItemsSource<G, T> {
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }

    pub fn as_grouped(&self) -> Option<&GroupedSource<G, T>> {
        match self {
            Self::Grouped(source) => Some(source),
            _ => None,
        }
    }

    fn flat_item(
        source: &dyn ItemsViewSource<Item = G>,
        position: usize,
    ) -> Result<SourceItem<G, T>, SourceError> {
        if position < source.count() {
            if source.is_header(position) {
                return Ok(SourceItem::Header);
            }
            if source.is_footer(position) {
                return Ok(SourceItem::Footer);
            }
        }
        source.item_at(position).map(SourceItem::Entry)
    }

    fn flat_position(
        source: &dyn ItemsViewSource<Item = G>,
        item: &SourceItem<G, T>,
    ) -> Result<usize, SourceError> {
        if source.is_disposed() {
            return Err(SourceError::Disposed);
        }
        let count = source.count();
        match item {
            SourceItem::Header if source.is_header(0) => Ok(0),
            SourceItem::Footer if count > 0 && source.is_footer(count - 1) => Ok(count - 1),
            SourceItem::Entry(entry) => source.position_of(entry),
            _ => Err(SourceError::NotFound),
        }
    }
}

impl<G, T> ItemsViewSource for ItemsSource<G, T> {
    type Item = SourceItem<G, T>;

    fn count(&self) -> usize {
        match self {
            Self::Static(s) => s.count(),
            Self::Observable(s) => s.count(),
            Self::Grouped(s) => s.count(),
        }
    }

    fn item_at(&self, position: usize) -> Result<SourceItem<G, T>, SourceError> {
        match self {
            Self::Static(s) => Self::flat_item(s, position),
            Self::Observable(s) => Self::flat_item(s, position),
            Self::Grouped(s) => s.item_at(position),
        }
    }

    fn position_of(&self, item: &SourceItem<G, T>) -> Result<usize, SourceError> {
        match self {
            Self::Static(s) => Self::flat_position(s, item),
            Self::Observable(s) => Self::flat_position(s, item),
            Self::Grouped(s) => s.position_of(item),
        }
    }

    fn is_header(&self, position: usize) -> bool {
        match self {
            Self::Static(s) => s.is_header(position),
            Self::Observable(s) => s.is_header(position),
            Self::Grouped(s) => s.is_header(position),
        }
    }

    fn is_footer(&self, position: usize) -> bool {
        match self {
            Self::Static(s) => s.is_footer(position),
            Self::Observable(s) => s.is_footer(position),
            Self::Grouped(s) => s.is_footer(position),
        }
    }

    fn dispose(&mut self) {
        match self {
            Self::Static(s) => s.dispose(),
            Self::Observable(s) => s.dispose(),
            Self::Grouped(s) => s.dispose(),
        }
    }

    fn is_disposed(&self) -> bool {
        match self {
            Self::Static(s) => s.is_disposed(),
            Self::Observable(s) => s.is_disposed(),
            Self::Grouped(s) => s.is_disposed(),
        }
    }
}

impl<G, T> GroupedItemsViewSource for ItemsSource<G, T> {
    fn is_group_header(&self, position: usize) -> bool {
        match self {
            Self::Grouped(s) => s.is_group_header(position),
            _ => false,
        }
    }

    fn is_group_footer(&self, position: usize) -> bool {
        match self {
            Self::Grouped(s) => s.is_group_footer(position),
            _ => false,
        }
    }
}
