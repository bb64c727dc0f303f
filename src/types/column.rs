use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CellContent, SortValue, ValueSource};

/// Renders one body cell from a row and its index in the row collection.
pub type CellRenderer<R> = Box<dyn Fn(&R, usize) -> CellContent>;

/// Renders a custom header label.
pub type HeaderRenderer = Box<dyn Fn() -> CellContent>;

fn default_true() -> bool {
    true
}

/// Serializable part of a column declaration.
///
/// Lets a host keep its schema (keys, labels, width hints and capability
/// flags) in JSON and attach renderers in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOptions {
    /// Stable identifier correlating width and sort state to the column
    pub key: String,
    /// Header label; absent when a header renderer is used
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Pixel width hint
    #[serde(default, alias = "width", skip_serializing_if = "Option::is_none")]
    pub requested_width: Option<u32>,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub resizable: bool,
    /// Whether body cells report clicks to the host
    #[serde(default = "default_true")]
    pub clickable: bool,
}

impl ColumnOptions {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: None,
            requested_width: None,
            sortable: true,
            resizable: true,
            clickable: true,
        }
    }
}

/// Inputs the width allocator needs from a column.
pub trait WidthHint {
    fn key(&self) -> &str;
    fn requested_width(&self) -> Option<u32>;
    fn resizable(&self) -> bool;
}

impl WidthHint for ColumnOptions {
    fn key(&self) -> &str {
        &self.key
    }

    fn requested_width(&self) -> Option<u32> {
        self.requested_width
    }

    fn resizable(&self) -> bool {
        self.resizable
    }
}

/// One displayed column of a grid over rows of type `R`.
pub struct ColumnDescriptor<R> {
    pub options: ColumnOptions,
    /// Value used for ordering; `ValueSource::None` disables meaningful sorting
    pub value: ValueSource<R>,
    pub cell_renderer: CellRenderer<R>,
    pub header_renderer: Option<HeaderRenderer>,
}

impl<R> ColumnDescriptor<R> {
    /// Create a column with default flags and no width hint.
    pub fn new(
        key: impl Into<String>,
        cell_renderer: impl Fn(&R, usize) -> CellContent + 'static,
    ) -> Self {
        Self::from_options(ColumnOptions::new(key), cell_renderer)
    }

    /// Attach a renderer to a deserialized column declaration.
    pub fn from_options(
        options: ColumnOptions,
        cell_renderer: impl Fn(&R, usize) -> CellContent + 'static,
    ) -> Self {
        Self {
            options,
            value: ValueSource::None,
            cell_renderer: Box::new(cell_renderer),
            header_renderer: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.display_name = Some(name.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.options.requested_width = Some(width);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.options.sortable = sortable;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.options.resizable = resizable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.options.clickable = clickable;
        self
    }

    /// Sort by a per-row value.
    pub fn value(mut self, extract: impl Fn(&R) -> SortValue + 'static) -> Self {
        self.value = ValueSource::extract(extract);
        self
    }

    /// Sort by a constant; such a column never reorders rows.
    pub fn constant_value(mut self, value: impl Into<SortValue>) -> Self {
        self.value = ValueSource::Constant(value.into());
        self
    }

    pub fn header(mut self, render: impl Fn() -> CellContent + 'static) -> Self {
        self.header_renderer = Some(Box::new(render));
        self
    }

    pub fn key(&self) -> &str {
        &self.options.key
    }

    /// Header label: the header renderer wins over the display name.
    pub fn label(&self) -> CellContent {
        match (&self.header_renderer, &self.options.display_name) {
            (Some(render), _) => render(),
            (None, Some(name)) => CellContent::Text(name.clone()),
            (None, None) => CellContent::Empty,
        }
    }

    pub fn render_cell(&self, row: &R, index: usize) -> CellContent {
        (self.cell_renderer)(row, index)
    }
}

impl<R> WidthHint for ColumnDescriptor<R> {
    fn key(&self) -> &str {
        &self.options.key
    }

    fn requested_width(&self) -> Option<u32> {
        self.options.requested_width
    }

    fn resizable(&self) -> bool {
        self.options.resizable
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("options", &self.options)
            .field("value", &self.value)
            .field("header_renderer", &self.header_renderer.is_some())
            .finish_non_exhaustive()
    }
}
