//! Column width allocation.
//!
//! Turns per-column width hints into concrete pixel widths that fill the
//! observed container, and applies live drag adjustments from resize handles.
//!
//! Non-resizable columns keep their configured width forever (even below the
//! minimum). Resizable columns never go below the minimum and share whatever
//! budget is left in proportion to their current widths.

use std::collections::HashMap;

use crate::types::WidthHint;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    key: String,
    width: u32,
    resizable: bool,
}

/// Width map for one grid instance
#[derive(Debug, Clone)]
pub struct ColumnWidths {
    slots: Vec<Slot>,
    min_width: u32,
    /// Vertical scrollbar reservation, set by the first nonzero measurement
    scrollbar_width: Option<u32>,
    /// Last observed container width
    container_width: Option<u32>,
    /// Index of the column under an active drag
    active_drag: Option<usize>,
}

/// Width a column starts with before any container observation.
pub fn initial_width<C: WidthHint + ?Sized>(column: &C, min_width: u32) -> u32 {
    match (column.resizable(), column.requested_width()) {
        (true, Some(w)) if w >= min_width => w,
        (true, _) => min_width,
        (false, Some(w)) => w,
        (false, None) => min_width,
    }
}

fn to_px(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

impl ColumnWidths {
    /// Build the initial width map from hints.
    pub fn new<C: WidthHint>(columns: &[C], min_width: u32) -> Self {
        let mut widths = Self {
            slots: Vec::new(),
            min_width,
            scrollbar_width: None,
            container_width: None,
            active_drag: None,
        };
        widths.rebuild(columns);
        widths
    }

    /// Rebuild from a new schema.
    ///
    /// Hint-based widths are restored and, if the container has already been
    /// observed, immediately reflowed to fill it. The scrollbar measurement is
    /// kept; any drag session is dropped.
    pub fn rebuild<C: WidthHint>(&mut self, columns: &[C]) {
        self.slots = columns
            .iter()
            .map(|c| Slot {
                key: c.key().to_string(),
                width: initial_width(c, self.min_width),
                resizable: c.resizable(),
            })
            .collect();
        self.active_drag = None;
        if let Some(container) = self.container_width {
            self.reflow(container);
        }
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current width of the column with `key`.
    pub fn width(&self, key: &str) -> Option<u32> {
        self.slots.iter().find(|s| s.key == key).map(|s| s.width)
    }

    /// Current width of the column at `index`.
    pub fn width_at(&self, index: usize) -> Option<u32> {
        self.slots.get(index).map(|s| s.width)
    }

    /// Widths in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.slots.iter().map(|s| (s.key.as_str(), s.width))
    }

    pub fn to_map(&self) -> HashMap<String, u32> {
        self.slots
            .iter()
            .map(|s| (s.key.clone(), s.width))
            .collect()
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> u32 {
        to_px(self.slots.iter().map(|s| i64::from(s.width)).sum())
    }

    /// X offset of a column's left edge relative to the first column.
    pub fn left_edge(&self, index: usize) -> u32 {
        to_px(
            self.slots
                .iter()
                .take(index)
                .map(|s| i64::from(s.width))
                .sum(),
        )
    }

    /// Index of the column spanning `x` (relative to the first column).
    pub fn column_at(&self, x: f64) -> Option<usize> {
        if x < 0.0 {
            return None;
        }
        let mut right = 0.0;
        for (i, slot) in self.slots.iter().enumerate() {
            right += f64::from(slot.width);
            if x < right {
                return Some(i);
            }
        }
        None
    }

    pub fn is_resizable(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.resizable)
    }

    pub fn container_width(&self) -> Option<u32> {
        self.container_width
    }

    pub fn scrollbar_width(&self) -> Option<u32> {
        self.scrollbar_width
    }

    /// Record the vertical scrollbar width from a rendered scroll element.
    ///
    /// The first nonzero measurement is kept. A zero reading (no scrollbar
    /// yet) is not cached, so a later call can still pick the scrollbar up.
    pub fn measure_scrollbar(&mut self, offset_width: i32, client_width: i32) -> u32 {
        if let Some(width) = self.scrollbar_width {
            return width;
        }
        let width = u32::try_from(offset_width.saturating_sub(client_width)).unwrap_or(0);
        if width > 0 {
            self.scrollbar_width = Some(width);
        }
        width
    }

    /// Width the columns should fill for a container of `container_width`.
    pub fn fillable_width(&self, container_width: u32) -> u32 {
        container_width.saturating_sub(self.scrollbar_width.unwrap_or(0))
    }

    /// Redistribute resizable widths so all columns fill `container_width`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn reflow(&mut self, container_width: u32) {
        self.container_width = Some(container_width);

        let min = i64::from(self.min_width);
        let fillable = i64::from(self.fillable_width(container_width));
        let fixed: i64 = self
            .slots
            .iter()
            .filter(|s| !s.resizable)
            .map(|s| i64::from(s.width))
            .sum();
        let current_total: i64 = self
            .slots
            .iter()
            .filter(|s| s.resizable)
            .map(|s| i64::from(s.width))
            .sum();
        if current_total <= 0 {
            return;
        }

        let budget = (fillable - fixed).max(0) as f64;
        for slot in self.slots.iter_mut().filter(|s| s.resizable) {
            let share = (budget * f64::from(slot.width) / current_total as f64).round() as i64;
            slot.width = to_px(share.max(min));
        }

        let total: i64 = self.slots.iter().map(|s| i64::from(s.width)).sum();
        let mut rest = total - fillable;
        if rest > 0 {
            for slot in self.slots.iter_mut().filter(|s| s.resizable) {
                if rest == 0 {
                    break;
                }
                let spare = i64::from(slot.width) - min;
                if spare <= 0 {
                    continue;
                }
                let take = spare.min(rest);
                slot.width = to_px(i64::from(slot.width) - take);
                rest -= take;
            }
        } else if rest < 0 {
            if let Some(slot) = self.slots.iter_mut().find(|s| s.resizable) {
                slot.width = to_px(i64::from(slot.width) - rest);
            }
            rest = 0;
        }

        if rest > 0 {
            log::debug!("reflow to {container_width}px overflows by {rest}px at minimum widths");
        } else {
            log::debug!("reflow to {container_width}px (fillable {fillable}px)");
        }
    }

    /// Start a drag session on a resizable column.
    ///
    /// Returns false (and changes nothing) for non-resizable or unknown columns.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        if !self.is_resizable(index) {
            return false;
        }
        self.active_drag = Some(index);
        log::debug!("resize started on column {index}");
        true
    }

    /// Column under the active drag, if any.
    pub fn active_drag(&self) -> Option<usize> {
        self.active_drag
    }

    /// Resize the dragged column so its right edge follows the pointer.
    ///
    /// No other column changes. Returns the new width, or `None` when no drag
    /// is active.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn drag_to(&mut self, pointer_x: f64, column_left_x: f64) -> Option<u32> {
        let index = self.active_drag?;
        let min = self.min_width;
        let slot = self.slots.get_mut(index)?;
        let wanted = (pointer_x - column_left_x).round();
        slot.width = if wanted.is_nan() || wanted < f64::from(min) {
            min
        } else {
            wanted.min(f64::from(u32::MAX)) as u32
        };
        Some(slot.width)
    }

    /// End the drag session. Returns the column that was being dragged.
    pub fn end_drag(&mut self) -> Option<usize> {
        let ended = self.active_drag.take();
        if let Some(index) = ended {
            log::debug!("resize ended on column {index}");
        }
        ended
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
    use crate::types::ColumnOptions;

    fn col(key: &str, width: Option<u32>, resizable: bool) -> ColumnOptions {
        ColumnOptions {
            requested_width: width,
            resizable,
            ..ColumnOptions::new(key)
        }
    }

    fn widths(w: &ColumnWidths) -> Vec<u32> {
        w.iter().map(|(_, w)| w).collect()
    }

    #[test]
    fn test_initial_widths() {
        let columns = [
            col("small", Some(40), true),
            col("big", Some(180), true),
            col("none", None, true),
            col("fixed_small", Some(50), false),
            col("fixed_none", None, false),
        ];
        let w = ColumnWidths::new(&columns, 100);
        assert_eq!(widths(&w), vec![100, 180, 100, 50, 100]);
    }

    #[test]
    fn test_no_reflow_before_observation() {
        let columns = [col("a", Some(150), true), col("b", None, true)];
        let w = ColumnWidths::new(&columns, 100);
        assert_eq!(w.container_width(), None);
        assert_eq!(w.total_width(), 250);
    }

    #[test]
    fn test_reflow_preserves_proportions() {
        let columns = [col("a", Some(100), true), col("b", Some(300), true)];
        let mut w = ColumnWidths::new(&columns, 100);
        w.reflow(800);
        assert_eq!(widths(&w), vec![200, 600]);
    }

    #[test]
    fn test_rounding_surplus_is_absorbed() {
        // 333.33 rounds down; the missing pixel goes to the first resizable column
        let columns = [col("a", None, true), col("b", None, true), col("c", None, true)];
        let mut w = ColumnWidths::new(&columns, 100);
        w.reflow(1000);
        assert_eq!(widths(&w), vec![334, 333, 333]);
        assert_eq!(w.total_width(), 1000);
    }

    #[test]
    fn test_rounding_overflow_shrinks_first_column_above_minimum() {
        // 333.67 rounds up to 334 three times: one pixel too many
        let columns = [col("a", None, true), col("b", None, true), col("c", None, true)];
        let mut w = ColumnWidths::new(&columns, 100);
        w.reflow(1001);
        assert_eq!(widths(&w), vec![333, 334, 334]);
        assert_eq!(w.total_width(), 1001);
    }

    #[test]
    fn test_scrollbar_reservation_measured_once() {
        let columns = [col("a", None, true)];
        let mut w = ColumnWidths::new(&columns, 100);
        assert_eq!(w.measure_scrollbar(515, 500), 15);
        assert_eq!(w.measure_scrollbar(520, 500), 15);
        w.reflow(515);
        assert_eq!(widths(&w), vec![500]);
    }

    #[test]
    fn test_zero_scrollbar_reading_is_not_cached() {
        let columns = [col("a", None, true), col("b", None, true)];
        let mut w = ColumnWidths::new(&columns, 100);
        assert_eq!(w.measure_scrollbar(1000, 1000), 0);
        assert_eq!(w.scrollbar_width(), None);
        w.reflow(1000);
        assert_eq!(w.total_width(), 1000);

        // rows arrive and the scrollbar shows up
        assert_eq!(w.measure_scrollbar(1000, 985), 15);
        assert_eq!(w.measure_scrollbar(1000, 1000), 15);
        w.reflow(1000);
        assert_eq!(w.total_width(), 985);
    }

    #[test]
    fn test_drag_updates_only_active_column() {
        let columns = [col("a", None, true), col("b", None, true), col("fixed", Some(60), false)];
        let mut w = ColumnWidths::new(&columns, 100);
        assert!(!w.begin_drag(2));
        assert!(w.begin_drag(1));

        let left = f64::from(w.left_edge(1));
        assert_eq!(w.drag_to(left + 240.0, left), Some(240));
        assert_eq!(widths(&w), vec![100, 240, 60]);

        assert_eq!(w.drag_to(left + 10.0, left), Some(100));
        assert_eq!(w.end_drag(), Some(1));
        assert_eq!(w.drag_to(left + 300.0, left), None);
        assert_eq!(widths(&w), vec![100, 100, 60]);
    }

    #[test]
    fn test_rebuild_reflows_when_container_known() {
        let mut w = ColumnWidths::new(&[col("a", None, true)], 100);
        w.reflow(400);
        w.rebuild(&[col("x", None, true), col("y", None, true)]);
        assert_eq!(widths(&w), vec![200, 200]);
        assert_eq!(w.width("y"), Some(200));
    }

    #[test]
    fn test_column_at() {
        let w = ColumnWidths::new(&[col("a", None, true), col("b", Some(150), true)], 100);
        assert_eq!(w.column_at(-1.0), None);
        assert_eq!(w.column_at(0.0), Some(0));
        assert_eq!(w.column_at(99.5), Some(0));
        assert_eq!(w.column_at(100.0), Some(1));
        assert_eq!(w.column_at(250.0), None);
    }
}
