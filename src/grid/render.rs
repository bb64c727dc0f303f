//! Headless render model.
//!
//! The grid produces these plain structs; the DOM binding and the text
//! renderer turn them into output. Class names match the stylesheet the demo
//! ships with.

use crate::types::{CellContent, SortOrder};

/// Base class of every body row
pub const ROW_CLASS: &str = "table-row";
/// Class of the header label element (the only sort click target)
pub const HEADER_TITLE_CLASS: &str = "table-header-cell-title";
/// Class of the resize handle element
pub const HANDLE_CLASS: &str = "table-header-cell-separator";
/// Class of a body cell
pub const CELL_CLASS: &str = "table-row-cell";

/// Mouse cursor hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Auto,
    Pointer,
    ColResize,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Pointer => "pointer",
            Self::ColResize => "col-resize",
        }
    }
}

/// Resize handle of a resizable header cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleView {
    /// True while this handle is being dragged
    pub resizing: bool,
}

impl HandleView {
    pub fn class_name(self) -> String {
        let mut class = format!("{HANDLE_CLASS} _hoverable");
        if self.resizing {
            class.push_str(" _resizing");
        }
        class
    }
}

/// One header cell
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCellView {
    pub key: String,
    pub label: CellContent,
    pub width: u32,
    pub height: u32,
    pub cursor: Cursor,
    /// Present only on the active sorted column
    pub sort_indicator: Option<SortOrder>,
    /// Present only on resizable columns
    pub handle: Option<HandleView>,
}

/// One body cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub key: String,
    pub width: u32,
    pub content: CellContent,
    pub clickable: bool,
}

/// One mounted body row
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Index into the row collection
    pub index: usize,
    pub class_name: String,
    pub height: u32,
    pub cells: Vec<CellView>,
}

/// Mounted rows plus the blank space standing in for unmounted ones
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyView {
    pub rows: Vec<RowView>,
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl BodyView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
