use itemsource::SourceOptions;

/// What the owning view declares about its items.
///
/// Header/footer flags correspond to the view having a header/footer (or template for one);
/// the group template flags only matter while `is_grouped` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemsViewConfig {
    pub is_grouped: bool,
    pub has_header: bool,
    pub has_footer: bool,
    pub has_group_header_template: bool,
    pub has_group_footer_template: bool,
}

impl ItemsViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grouped(mut self, is_grouped: bool) -> Self {
        self.is_grouped = is_grouped;
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

    pub fn with_group_header_template(mut self, has_template: bool) -> Self {
        self.has_group_header_template = has_template;
        self
    }

    pub fn with_group_footer_template(mut self, has_template: bool) -> Self {
        self.has_group_footer_template = has_template;
        self
    }

    /// The options the active source is built with.
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions::new()
            .with_grouped(self.is_grouped)
            .with_header(self.has_header)
            .with_footer(self.has_footer)
            .with_group_headers(self.is_grouped && self.has_group_header_template)
            .with_group_footers(self.is_grouped && self.has_group_footer_template)
    }
}

impl From<ItemsViewConfig> for SourceOptions {
    fn from(config: ItemsViewConfig) -> Self {
        config.source_options()
    }
}
