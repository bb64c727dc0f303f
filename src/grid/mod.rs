//! Main Grid struct - composes the column schema, width map, sort state and
//! row windowing into a render model, and handles user interaction.
//!
//! The grid never stores rows. Rendering reads through the host's slice, and
//! a sorting header click reorders that slice **in place**.
//!
//! Two independent state machines live here:
//! - resize: `Idle -> ResizingColumn(i) -> Idle` (handle press / pointer up)
//! - sort: `Unsorted -> Asc(c) <-> Desc(c) -> Asc(c') ...` (label clicks)

#[cfg(target_arch = "wasm32")]
pub mod dom;
mod events;
mod render;
mod text;

use std::fmt;
use std::ops::Range;

pub use events::{GridAction, HitTarget, PointerEvent, RESIZE_HANDLE_SIZE};
pub use render::{
    BodyView, CellView, Cursor, HandleView, HeaderCellView, RowView, CELL_CLASS, HANDLE_CLASS,
    HEADER_TITLE_CLASS, ROW_CLASS,
};
pub use text::render_text;

use crate::error::{GridError, Result};
use crate::layout::{ColumnWidths, Viewport, Virtualizer};
use crate::sort::sort_by;
use crate::types::{ColumnDescriptor, GridConfig, SortState};

/// Host callback for clicks on clickable body cells.
pub type CellClickHandler<R> = Box<dyn FnMut(&PointerEvent, &R)>;

/// Predicate deciding whether a row gets a class.
pub type RowPredicate<R> = Box<dyn Fn(&R, usize) -> bool>;

/// A virtualized, resizable, sortable grid over rows of type `R`
pub struct Grid<R> {
    columns: Vec<ColumnDescriptor<R>>,
    widths: ColumnWidths,
    sort: Option<SortState>,
    config: GridConfig,
    viewport: Box<dyn Virtualizer>,
    on_cell_click: Option<CellClickHandler<R>>,
    row_classes: Vec<(String, RowPredicate<R>)>,
}

impl<R> Grid<R> {
    /// Create a grid using the built-in fixed-row-height viewport.
    pub fn new(columns: Vec<ColumnDescriptor<R>>, config: GridConfig) -> Self {
        let viewport = Viewport::new(f64::from(config.row_height), config.overscan);
        Self::with_virtualizer(columns, config, Box::new(viewport))
    }

    /// Create a grid that windows rows through a host-supplied virtualizer.
    pub fn with_virtualizer(
        columns: Vec<ColumnDescriptor<R>>,
        config: GridConfig,
        viewport: Box<dyn Virtualizer>,
    ) -> Self {
        let widths = ColumnWidths::new(&columns, config.min_column_width);
        Self {
            columns,
            widths,
            sort: None,
            config,
            viewport,
            on_cell_click: None,
            row_classes: Vec::new(),
        }
    }

    /// Register the host callback for cell clicks.
    pub fn on_cell_click(mut self, handler: impl FnMut(&PointerEvent, &R) + 'static) -> Self {
        self.on_cell_click = Some(Box::new(handler));
        self
    }

    /// Add `class_name` to every row for which `predicate` holds.
    pub fn row_class(
        mut self,
        class_name: impl Into<String>,
        predicate: impl Fn(&R, usize) -> bool + 'static,
    ) -> Self {
        self.row_classes.push((class_name.into(), Box::new(predicate)));
        self
    }

    /// Replace the schema. Widths are rebuilt from the new hints.
    pub fn set_schema(&mut self, columns: Vec<ColumnDescriptor<R>>) {
        self.widths.rebuild(&columns);
        self.columns = columns;
        if let Some(sort) = &self.sort {
            if !self.columns.iter().any(|c| c.key() == sort.key) {
                self.sort = None;
            }
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor<R>] {
        &self.columns
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key() == key)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn widths(&self) -> &ColumnWidths {
        &self.widths
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn viewport(&self) -> &dyn Virtualizer {
        self.viewport.as_ref()
    }

    /// Column under an active resize drag, if any.
    pub fn resizing_column(&self) -> Option<usize> {
        self.widths.active_drag()
    }

    pub fn is_resizing(&self) -> bool {
        self.widths.active_drag().is_some()
    }

    /// Container size observation: reflow column widths to fill `width`.
    pub fn observe_container_width(&mut self, width: u32) {
        self.widths.reflow(width);
    }

    /// Cache the vertical scrollbar width of the rendered scroll element.
    pub fn measure_scrollbar(&mut self, offset_width: i32, client_width: i32) -> u32 {
        self.widths.measure_scrollbar(offset_width, client_width)
    }

    /// Re-measure a scrollbar that was absent at the last reading.
    ///
    /// Called after the row collection changes. Returns `true` when a newly
    /// visible scrollbar made the columns reflow around it.
    pub fn remeasure_scrollbar(&mut self, offset_width: i32, client_width: i32) -> bool {
        if self.widths.scrollbar_width().is_some()
            || self.widths.measure_scrollbar(offset_width, client_width) == 0
        {
            return false;
        }
        match self.widths.container_width() {
            Some(width) => {
                self.widths.reflow(width);
                true
            }
            None => false,
        }
    }

    /// Height of the scroll element, header included.
    pub fn set_viewport_height(&mut self, height: f64) {
        let body = height - f64::from(self.config.header_height);
        self.viewport.set_viewport_height(body);
    }

    pub fn scroll_to_index(&mut self, index: usize, row_count: usize) {
        self.viewport.scroll_to_index(index, row_count);
    }

    pub fn scroll_by(&mut self, delta: f64, row_count: usize) {
        self.viewport.scroll_by(delta, row_count);
    }

    pub fn set_scroll_offset(&mut self, offset: f64, row_count: usize) {
        self.viewport.set_scroll_offset(offset, row_count);
    }

    /// Sort rows in place by the column with `key`, as if its label had been
    /// clicked.
    ///
    /// # Errors
    /// Returns `GridError::UnknownColumn` if no column has `key`.
    pub fn sort_by_key(&mut self, key: &str, rows: &mut [R]) -> Result<Option<SortState>> {
        let index = self
            .column_index(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        Ok(self.sort_column(index, rows))
    }

    /// Apply the next step of the sort cycle to column `index`.
    ///
    /// Rows are reordered in place. Returns `None` when manual sort is off or
    /// the column is not sortable.
    pub fn sort_column(&mut self, index: usize, rows: &mut [R]) -> Option<SortState> {
        if !self.config.manual_sort {
            return None;
        }
        let column = self.columns.get(index)?;
        if !column.options.sortable {
            return None;
        }
        let order = SortState::next_order(self.sort.as_ref(), column.key());
        rows.sort_by(sort_by(order, &column.value));
        let state = SortState::new(column.key(), order);
        log::debug!("sorted {} rows by {} {:?}", rows.len(), state.key, state.order);
        self.sort = Some(state.clone());
        Some(state)
    }

    /// Header cells in schema order.
    pub fn header(&self) -> Vec<HeaderCellView> {
        let resizing = self.widths.active_drag();
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let sort_enabled = column.options.sortable && self.config.manual_sort;
                let sort_indicator = self
                    .sort
                    .as_ref()
                    .filter(|s| sort_enabled && s.key == column.key())
                    .map(|s| s.order);
                HeaderCellView {
                    key: column.key().to_string(),
                    label: column.label(),
                    width: self.widths.width_at(i).unwrap_or(self.widths.min_width()),
                    height: self.config.header_height,
                    cursor: if sort_enabled {
                        Cursor::Pointer
                    } else {
                        Cursor::Auto
                    },
                    sort_indicator,
                    handle: column.options.resizable.then_some(HandleView {
                        resizing: resizing == Some(i),
                    }),
                }
            })
            .collect()
    }

    /// Class list for a body row: the base class plus every matching class.
    pub fn row_class_name(&self, row: &R, index: usize) -> String {
        let mut class = String::from(ROW_CLASS);
        for (name, predicate) in &self.row_classes {
            if predicate(row, index) {
                class.push(' ');
                class.push_str(name);
            }
        }
        class
    }

    /// Render one body row.
    pub fn row_view(&self, row: &R, index: usize) -> RowView {
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| CellView {
                key: column.key().to_string(),
                width: self.widths.width_at(i).unwrap_or(self.widths.min_width()),
                content: column.render_cell(row, index),
                clickable: column.options.clickable,
            })
            .collect();
        RowView {
            index,
            class_name: self.row_class_name(row, index),
            height: self.config.row_height,
            cells,
        }
    }

    /// Rows the virtualizer currently mounts.
    pub fn visible_range(&self, row_count: usize) -> Range<usize> {
        self.viewport.visible_range(row_count)
    }

    /// Render the mounted slice of `rows`.
    pub fn body(&self, rows: &[R]) -> BodyView {
        let range = self.visible_range(rows.len());
        let (padding_top, padding_bottom) = self.viewport.padding(rows.len());
        let start = range.start;
        let rows = rows
            .get(range)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(offset, row)| self.row_view(row, start + offset))
            .collect();
        BodyView {
            rows,
            padding_top,
            padding_bottom,
        }
    }
}

impl<R> fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns)
            .field("widths", &self.widths)
            .field("sort", &self.sort)
            .field("config", &self.config)
            .field("row_classes", &self.row_classes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{CellContent, SortOrder};

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: &'static str,
        age: u32,
    }

    fn schema() -> Vec<ColumnDescriptor<Person>> {
        vec![
            ColumnDescriptor::new("actions", |_: &Person, _| CellContent::html("<i></i>"))
                .name("Actions")
                .width(50)
                .resizable(false)
                .sortable(false)
                .clickable(false),
            ColumnDescriptor::new("name", |p: &Person, _| p.name.into())
                .name("Name")
                .value(|p| p.name.into()),
            ColumnDescriptor::new("age", |p: &Person, _| p.age.to_string().into())
                .name("Age")
                .value(|p| p.age.into()),
        ]
    }

    fn people() -> Vec<Person> {
        vec![
            Person { name: "carol", age: 30 },
            Person { name: "Alice", age: 10 },
            Person { name: "bob", age: 20 },
        ]
    }

    #[test]
    fn test_header_cells() {
        let grid = Grid::new(schema(), GridConfig::default());
        let header = grid.header();
        assert_eq!(header.len(), 3);
        assert_eq!(header[0].label, CellContent::text("Actions"));
        assert_eq!(header[0].width, 50);
        assert_eq!(header[0].cursor, Cursor::Auto);
        assert!(header[0].handle.is_none());
        assert_eq!(header[1].cursor, Cursor::Pointer);
        assert_eq!(header[1].handle, Some(HandleView { resizing: false }));
        assert!(header.iter().all(|h| h.sort_indicator.is_none()));
    }

    #[test]
    fn test_sort_indicator_follows_active_column() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = people();
        grid.sort_by_key("age", &mut rows).unwrap();
        let header = grid.header();
        assert_eq!(header[2].sort_indicator, Some(SortOrder::Ascending));
        assert_eq!(header[1].sort_indicator, None);

        grid.sort_by_key("name", &mut rows).unwrap();
        let header = grid.header();
        assert_eq!(header[1].sort_indicator, Some(SortOrder::Ascending));
        assert_eq!(header[2].sort_indicator, None);
        let names: Vec<&str> = rows.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Alice", "bob", "carol"]);
    }

    #[test]
    fn test_unknown_sort_key() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let err = grid.sort_by_key("missing", &mut people()).unwrap_err();
        assert!(matches!(err, GridError::UnknownColumn(k) if k == "missing"));
    }

    #[test]
    fn test_manual_sort_disabled() {
        let config = GridConfig {
            manual_sort: false,
            ..GridConfig::default()
        };
        let mut grid = Grid::new(schema(), config);
        let mut rows = people();
        assert_eq!(grid.sort_column(2, &mut rows), None);
        assert_eq!(rows, people());
        assert!(grid.header().iter().all(|h| h.cursor == Cursor::Auto));
    }

    #[test]
    fn test_row_classes_in_insertion_order() {
        let grid = Grid::new(schema(), GridConfig::default())
            .row_class("_adult", |p: &Person, _| p.age >= 18)
            .row_class("_even", |_, i| i % 2 == 0);
        let rows = people();
        assert_eq!(grid.row_class_name(&rows[0], 0), "table-row _adult _even");
        assert_eq!(grid.row_class_name(&rows[1], 1), "table-row");
        assert_eq!(grid.row_class_name(&rows[2], 2), "table-row _adult _even");
    }

    #[test]
    fn test_body_renders_visible_slice() {
        let config = GridConfig {
            row_height: 10,
            header_height: 20,
            overscan: 0,
            ..GridConfig::default()
        };
        let mut grid = Grid::new(schema(), config);
        grid.set_viewport_height(40.0);
        let rows: Vec<Person> = (0..50).map(|age| Person { name: "x", age }).collect();

        let body = grid.body(&rows);
        assert_eq!(body.rows.len(), 2);
        assert_eq!(body.rows[1].index, 1);
        assert_eq!(body.rows[1].cells[2].content, CellContent::text("1"));
        assert!(!body.rows[1].cells[0].clickable);

        grid.scroll_to_index(10, rows.len());
        let body = grid.body(&rows);
        assert_eq!(body.rows.first().map(|r| r.index), Some(10));
        assert!((body.padding_top - 100.0).abs() < f64::EPSILON);

        assert!(grid.body(&[]).is_empty());
    }

    #[test]
    fn test_scrollbar_appearing_after_rows_arrive_reflows() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        grid.measure_scrollbar(1000, 1000);
        grid.observe_container_width(1000);
        assert_eq!(grid.widths().total_width(), 1000);

        assert!(!grid.remeasure_scrollbar(1000, 1000));
        assert!(grid.remeasure_scrollbar(1000, 985));
        assert_eq!(grid.widths().total_width(), 985);
        assert_eq!(grid.widths().width("actions"), Some(50));

        // reserved for good now
        assert!(!grid.remeasure_scrollbar(1000, 1000));
        assert_eq!(grid.widths().scrollbar_width(), Some(15));
    }

    #[test]
    fn test_remeasure_before_container_is_known() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        assert!(!grid.remeasure_scrollbar(1000, 983));
        grid.observe_container_width(1000);
        assert_eq!(grid.widths().total_width(), 983);
    }

    #[test]
    fn test_set_schema_drops_stale_sort() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        grid.sort_by_key("age", &mut people()).unwrap();
        grid.set_schema(schema().into_iter().take(2).collect());
        assert!(grid.sort_state().is_none());
        assert_eq!(grid.widths().len(), 2);
    }
}
