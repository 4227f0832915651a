use alloc::rc::Rc;
use core::fmt;

/// Header/footer reservations and grouping for a bound collection.
///
/// `has_header`/`has_footer` reserve one slot at the very start/end of the position space.
/// `has_group_headers`/`has_group_footers` reserve one slot around every group's members and
/// only apply when `grouped` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceOptions {
    pub grouped: bool,
    pub has_header: bool,
    pub has_footer: bool,
    pub has_group_headers: bool,
    pub has_group_footers: bool,
}

impl SourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_footer(mut self, has_footer: bool) -> Self {
        self.has_footer = has_footer;
        self
    }

    pub fn with_group_headers(mut self, has_group_headers: bool) -> Self {
        self.has_group_headers = has_group_headers;
        self
    }

    pub fn with_group_footers(mut self, has_group_footers: bool) -> Self {
        self.has_group_footers = has_group_footers;
        self
    }

    /// The options each group's own source is built with: group slots become that source's
    /// header/footer.
    pub fn for_group(&self) -> Self {
        Self {
            grouped: false,
            has_header: self.has_group_headers,
            has_footer: self.has_group_footers,
            has_group_headers: false,
            has_group_footers: false,
        }
    }

    pub(crate) fn header_slots(&self) -> usize {
        usize::from(self.has_header)
    }

    pub(crate) fn footer_slots(&self) -> usize {
        usize::from(self.has_footer)
    }
}

/// Pluggable equality used to resolve an item to its position.
///
/// Cheap to clone: the predicate lives in an `Rc`.
pub struct Comparer<T> {
    eq: Rc<dyn Fn(&T, &T) -> bool>,
}

impl<T> Comparer<T> {
    pub fn new(eq: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Self { eq: Rc::new(eq) }
    }

    /// Value equality.
    pub fn by_eq() -> Self
    where
        T: PartialEq + 'static,
    {
        Self::new(|a: &T, b: &T| a == b)
    }

    pub fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }
}

impl<U: ?Sized + 'static> Comparer<Rc<U>> {
    /// Reference identity: two handles are equal only if they point at the same allocation.
    pub fn ptr_eq() -> Self {
        Self::new(|a: &Rc<U>, b: &Rc<U>| Rc::ptr_eq(a, b))
    }
}

impl<T> Clone for Comparer<T> {
    fn clone(&self) -> Self {
        Self {
            eq: Rc::clone(&self.eq),
        }
    }
}

impl<T> fmt::Debug for Comparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparer(..)")
    }
}
