//! Viewport state for vertical scrolling over fixed-height rows.

use std::ops::Range;

/// Windowing over a row collection.
///
/// Given the number of rows, decides which ones are mounted, and offers
/// imperative scroll control. Hosts can supply their own implementation.
pub trait Virtualizer {
    /// Height available to body rows, in pixels.
    fn set_viewport_height(&mut self, height: f64);

    /// Rows to mount for the current scroll position.
    fn visible_range(&self, row_count: usize) -> Range<usize>;

    /// Current vertical scroll offset in pixels.
    fn scroll_offset(&self) -> f64;

    /// Set the absolute scroll offset (clamped).
    fn set_scroll_offset(&mut self, offset: f64, row_count: usize);

    /// Scroll by a delta in pixels (clamped).
    fn scroll_by(&mut self, delta: f64, row_count: usize) {
        let offset = self.scroll_offset() + delta;
        self.set_scroll_offset(offset, row_count);
    }

    /// Scroll so the row at `index` is the first one in view.
    fn scroll_to_index(&mut self, index: usize, row_count: usize);

    /// Blank space above and below the mounted rows, in pixels.
    fn padding(&self, row_count: usize) -> (f64, f64);

    /// Row under a y position measured from the top of the body viewport.
    fn row_at(&self, y: f64, row_count: usize) -> Option<usize>;
}

/// Viewport over rows of one fixed height
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Vertical scroll position in content coordinates
    pub scroll_y: f64,
    /// Viewport height in pixels (body only, header excluded)
    pub height: f64,
    /// Height of every row in pixels
    pub row_height: f64,
    /// Rows mounted beyond each edge of the visible window
    pub overscan: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            f64::from(crate::types::DEFAULT_ROW_HEIGHT),
            crate::types::DEFAULT_OVERSCAN,
        )
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
impl Viewport {
    /// Create a viewport with a default height of 600px
    pub fn new(row_height: f64, overscan: usize) -> Self {
        Self {
            scroll_y: 0.0,
            height: 600.0,
            row_height,
            overscan,
        }
    }

    /// Total height of all rows.
    pub fn content_height(&self, row_count: usize) -> f64 {
        row_count as f64 * self.row_height
    }

    /// Largest scroll offset that still shows content.
    pub fn max_scroll(&self, row_count: usize) -> f64 {
        (self.content_height(row_count) - self.height).max(0.0)
    }

    /// Find the row at a y position in content coordinates.
    pub fn row_at_y(&self, y: f64, row_count: usize) -> Option<usize> {
        if y < 0.0 || self.row_height <= 0.0 {
            return None;
        }
        let row = (y / self.row_height).floor() as usize;
        (row < row_count).then_some(row)
    }

    /// Top edge of a row in content coordinates.
    pub fn row_offset(&self, index: usize) -> f64 {
        index as f64 * self.row_height
    }

    /// Clamp scroll position to valid range.
    pub fn clamp_scroll(&mut self, row_count: usize) {
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll(row_count));
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
impl Virtualizer for Viewport {
    fn set_viewport_height(&mut self, height: f64) {
        self.height = height.max(0.0);
    }

    fn visible_range(&self, row_count: usize) -> Range<usize> {
        if row_count == 0 || self.row_height <= 0.0 {
            return 0..0;
        }
        let first = (self.scroll_y / self.row_height).floor().max(0.0) as usize;
        let last = ((self.scroll_y + self.height) / self.row_height).ceil().max(0.0) as usize;
        let start = first.saturating_sub(self.overscan).min(row_count);
        let end = last.saturating_add(self.overscan).min(row_count);
        start..end
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_y
    }

    fn set_scroll_offset(&mut self, offset: f64, row_count: usize) {
        self.scroll_y = offset;
        self.clamp_scroll(row_count);
    }

    fn scroll_to_index(&mut self, index: usize, row_count: usize) {
        let offset = self.row_offset(index);
        self.set_scroll_offset(offset, row_count);
    }

    fn padding(&self, row_count: usize) -> (f64, f64) {
        let range = self.visible_range(row_count);
        let top = self.row_offset(range.start);
        let bottom = self.row_offset(row_count.saturating_sub(range.end));
        (top, bottom)
    }

    fn row_at(&self, y: f64, row_count: usize) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        self.row_at_y(self.scroll_y + y, row_count)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        let mut v = Viewport::new(20.0, 2);
        v.set_viewport_height(100.0);
        v
    }

    #[test]
    fn test_visible_range_at_top() {
        let v = viewport();
        assert_eq!(v.visible_range(1000), 0..7);
        assert_eq!(v.visible_range(3), 0..3);
        assert_eq!(v.visible_range(0), 0..0);
    }

    #[test]
    fn test_visible_range_scrolled() {
        let mut v = viewport();
        v.set_scroll_offset(210.0, 1000);
        // rows 10..16 intersect [210, 310), plus 2 overscan each side
        assert_eq!(v.visible_range(1000), 8..18);
        assert_eq!(v.padding(1000), (160.0, 982.0 * 20.0));
    }

    #[test]
    fn test_scroll_clamps() {
        let mut v = viewport();
        v.scroll_by(-50.0, 100);
        assert_eq!(v.scroll_offset(), 0.0);
        v.scroll_to_index(99, 100);
        assert_eq!(v.scroll_offset(), v.max_scroll(100));
        assert_eq!(v.max_scroll(100), 1900.0);
        v.set_scroll_offset(500.0, 3);
        assert_eq!(v.scroll_offset(), 0.0);
    }

    #[test]
    fn test_row_at_y() {
        let v = viewport();
        assert_eq!(v.row_at_y(0.0, 10), Some(0));
        assert_eq!(v.row_at_y(19.9, 10), Some(0));
        assert_eq!(v.row_at_y(20.0, 10), Some(1));
        assert_eq!(v.row_at_y(200.0, 10), None);
        assert_eq!(v.row_at_y(-1.0, 10), None);
    }

    #[test]
    fn test_row_at_accounts_for_scroll() {
        let mut v = viewport();
        v.set_scroll_offset(45.0, 100);
        assert_eq!(v.row_at(0.0, 100), Some(2));
        assert_eq!(v.row_at(20.0, 100), Some(3));
        assert_eq!(v.row_at(-5.0, 100), None);
    }
}
