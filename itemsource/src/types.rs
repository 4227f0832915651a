/// What a position resolves to in a (possibly grouped) source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceItem<G, T> {
    /// The top-level header slot.
    Header,
    /// The top-level footer slot.
    Footer,
    /// A row of the top-level collection when grouping is off.
    Entry(G),
    /// A group's header slot, bound to the group itself.
    GroupHeader(G),
    /// A group's footer slot, bound to the group itself.
    GroupFooter(G),
    /// An item inside a group.
    Member(T),
}

impl<G, T> SourceItem<G, T> {
    pub fn is_decoration(&self) -> bool {
        matches!(
            self,
            Self::Header | Self::Footer | Self::GroupHeader(_) | Self::GroupFooter(_)
        )
    }

    /// The group a group header/footer slot is bound to.
    pub fn group(&self) -> Option<&G> {
        match self {
            Self::GroupHeader(g) | Self::GroupFooter(g) => Some(g),
            _ => None,
        }
    }
}
