//! Pointer handling for `Grid`.
//!
//! Coordinates are grid-local: `x` is measured from the left edge of the first
//! column (horizontal scroll already applied), `y` from the top of the visible
//! scroll area, where the sticky header occupies `0..header_height`.

use super::Grid;
use crate::types::SortState;

/// Width of the grab strip at the right edge of a resizable header cell
pub const RESIZE_HANDLE_SIZE: f64 = 8.0;

/// Pointer position and modifier keys of a mouse event
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Header label of a column (sort trigger)
    HeaderLabel(usize),
    /// Resize handle of a column
    HeaderHandle(usize),
    /// Header cell outside its label and handle
    HeaderCell(usize),
    /// Body cell; `row` indexes the row collection
    Cell { row: usize, column: usize },
    None,
}

/// Outcome of a click the host may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    /// Rows were reordered in place
    Sorted(SortState),
    /// The cell click callback ran
    CellClicked { row: usize, column: usize },
}

impl<R> Grid<R> {
    /// Classify a grid-local point.
    ///
    /// Header cells have no separate label box here, so everything left of
    /// the handle strip counts as the label.
    pub fn hit_test(&self, x: f64, y: f64, row_count: usize) -> HitTarget {
        let Some(column) = self.widths.column_at(x) else {
            return HitTarget::None;
        };
        let header_height = f64::from(self.config.header_height);
        if y < 0.0 {
            return HitTarget::None;
        }
        if y < header_height {
            let right = f64::from(self.widths.left_edge(column))
                + f64::from(self.widths.width_at(column).unwrap_or(0));
            if self.widths.is_resizable(column) && x >= right - RESIZE_HANDLE_SIZE {
                return HitTarget::HeaderHandle(column);
            }
            return HitTarget::HeaderLabel(column);
        }
        match self.viewport.row_at(y - header_height, row_count) {
            Some(row) => HitTarget::Cell { row, column },
            None => HitTarget::None,
        }
    }

    /// Mouse down. Starts a resize session when `target` is a handle.
    pub fn pointer_down(&mut self, target: HitTarget) -> bool {
        match target {
            HitTarget::HeaderHandle(column) => self.widths.begin_drag(column),
            _ => false,
        }
    }

    /// Mouse move during a resize session.
    ///
    /// `column_left_x` is the dragged column's left edge in the same
    /// coordinate space as `pointer_x`. Returns the new width.
    pub fn pointer_move(&mut self, pointer_x: f64, column_left_x: f64) -> Option<u32> {
        self.widths.drag_to(pointer_x, column_left_x)
    }

    /// Mouse move with a grid-local pointer position.
    pub fn pointer_move_local(&mut self, x: f64) -> Option<u32> {
        let column = self.widths.active_drag()?;
        let left = f64::from(self.widths.left_edge(column));
        self.widths.drag_to(x, left)
    }

    /// Mouse up anywhere. Ends the resize session, if one was active.
    pub fn pointer_up(&mut self) -> bool {
        self.widths.end_drag().is_some()
    }

    /// Click on `target`.
    ///
    /// A label click on a sortable column sorts `rows` **in place**. A click on
    /// a clickable cell invokes the cell click callback with the row.
    pub fn click(
        &mut self,
        target: HitTarget,
        event: &PointerEvent,
        rows: &mut [R],
    ) -> Option<GridAction> {
        match target {
            HitTarget::HeaderLabel(column) => {
                self.sort_column(column, rows).map(GridAction::Sorted)
            }
            HitTarget::Cell { row, column } => {
                if !self.columns.get(column)?.options.clickable {
                    return None;
                }
                let record = rows.get(row)?;
                let handler = self.on_cell_click.as_mut()?;
                handler(event, record);
                Some(GridAction::CellClicked { row, column })
            }
            HitTarget::HeaderHandle(_) | HitTarget::HeaderCell(_) | HitTarget::None => None,
        }
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
    use crate::types::{CellContent, ColumnDescriptor, GridConfig, SortOrder};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn grid() -> Grid<u32> {
        let config = GridConfig {
            header_height: 40,
            row_height: 20,
            ..GridConfig::default()
        };
        let columns = vec![
            ColumnDescriptor::new("fixed", |_: &u32, _| CellContent::Empty)
                .width(60)
                .resizable(false)
                .clickable(false),
            ColumnDescriptor::new("n", |n: &u32, _| n.to_string().into()).value(|n| (*n).into()),
        ];
        Grid::new(columns, config)
    }

    #[test]
    fn test_hit_test_regions() {
        let g = grid();
        assert_eq!(g.hit_test(10.0, 10.0, 5), HitTarget::HeaderLabel(0));
        // non-resizable columns have no handle
        assert_eq!(g.hit_test(59.0, 10.0, 5), HitTarget::HeaderLabel(0));
        assert_eq!(g.hit_test(100.0, 10.0, 5), HitTarget::HeaderLabel(1));
        assert_eq!(g.hit_test(155.0, 10.0, 5), HitTarget::HeaderHandle(1));
        assert_eq!(g.hit_test(70.0, 45.0, 5), HitTarget::Cell { row: 0, column: 1 });
        assert_eq!(g.hit_test(70.0, 61.0, 5), HitTarget::Cell { row: 1, column: 1 });
        assert_eq!(g.hit_test(70.0, 500.0, 5), HitTarget::None);
        assert_eq!(g.hit_test(500.0, 10.0, 5), HitTarget::None);
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut g = grid();
        assert!(!g.pointer_down(HitTarget::HeaderLabel(1)));
        assert!(g.pointer_down(g.hit_test(158.0, 5.0, 0)));
        assert_eq!(g.resizing_column(), Some(1));
        assert_eq!(g.header()[1].handle.map(|h| h.resizing), Some(true));

        assert_eq!(g.pointer_move_local(260.0), Some(200));
        assert_eq!(g.pointer_move_local(61.0), Some(100));
        assert_eq!(g.widths().width("fixed"), Some(60));

        assert!(g.pointer_up());
        assert!(!g.pointer_up());
        assert_eq!(g.pointer_move_local(400.0), None);
        assert_eq!(g.widths().width("n"), Some(100));
    }

    #[test]
    fn test_label_click_sorts_in_place() {
        let mut g = grid();
        let mut rows = vec![3, 1, 2];
        let event = PointerEvent::at(70.0, 10.0);
        let action = g.click(HitTarget::HeaderLabel(1), &event, &mut rows);
        assert_eq!(
            action,
            Some(GridAction::Sorted(SortState::new("n", SortOrder::Ascending)))
        );
        assert_eq!(rows, vec![1, 2, 3]);

        assert_eq!(g.click(HitTarget::HeaderHandle(1), &event, &mut rows), None);
        assert_eq!(g.click(HitTarget::HeaderCell(1), &event, &mut rows), None);
        assert_eq!(g.sort_state().map(|s| s.order), Some(SortOrder::Ascending));
    }

    #[test]
    fn test_cell_click_reaches_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut g = grid().on_cell_click(move |e: &PointerEvent, n: &u32| {
            sink.borrow_mut().push((*n, e.shift));
        });
        let mut rows = vec![7, 8];
        let event = PointerEvent {
            shift: true,
            ..PointerEvent::at(70.0, 65.0)
        };

        let target = g.hit_test(event.x, event.y, rows.len());
        assert_eq!(
            g.click(target, &event, &mut rows),
            Some(GridAction::CellClicked { row: 1, column: 1 })
        );
        // non-clickable column
        assert_eq!(g.click(HitTarget::Cell { row: 0, column: 0 }, &event, &mut rows), None);
        assert_eq!(*seen.borrow(), vec![(8, true)]);
    }
}
