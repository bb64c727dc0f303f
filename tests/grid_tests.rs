//! Grid behaviour tests for datagrid
//!
//! Sorting through header clicks, resize sessions, cell clicks, row classes
//! and row windowing, driven through the public `Grid` API.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::float_cmp
)]

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use datagrid::grid::{GridAction, HitTarget, PointerEvent};
use datagrid::{
    CellContent, ColumnDescriptor, Grid, GridConfig, SortOrder, SortState, Virtualizer,
};

#[derive(Debug, Clone, PartialEq)]
struct Item {
    n: i64,
    label: String,
}

fn item(n: i64, label: &str) -> Item {
    Item {
        n,
        label: label.to_string(),
    }
}

fn schema() -> Vec<ColumnDescriptor<Item>> {
    vec![
        ColumnDescriptor::new("edit", |_: &Item, _| CellContent::html("<i class=\"icon\"></i>"))
            .name("Edit")
            .width(60)
            .sortable(false)
            .clickable(false)
            .resizable(false),
        ColumnDescriptor::new("n", |i: &Item, _| i.n.to_string().into())
            .name("N")
            .value(|i| i.n.into()),
        ColumnDescriptor::new("label", |i: &Item, _| i.label.as_str().into())
            .name("Label")
            .value(|i| i.label.as_str().into()),
        ColumnDescriptor::new("same", |_: &Item, _| CellContent::Empty)
            .name("Same")
            .constant_value(1),
    ]
}

fn numbers(values: &[i64]) -> Vec<Item> {
    values.iter().map(|&n| item(n, "")).collect()
}

fn ns(rows: &[Item]) -> Vec<i64> {
    rows.iter().map(|r| r.n).collect()
}

fn label_click(grid: &mut Grid<Item>, column: usize, rows: &mut [Item]) -> Option<GridAction> {
    grid.click(HitTarget::HeaderLabel(column), &PointerEvent::default(), rows)
}

mod sorting {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_click_cycle_on_one_column() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = numbers(&[30, 10, 20]);
        assert_eq!(grid.sort_state(), None);

        label_click(&mut grid, 1, &mut rows);
        assert_eq!(ns(&rows), vec![10, 20, 30]);
        assert_eq!(grid.sort_state(), Some(&SortState::new("n", SortOrder::Ascending)));

        label_click(&mut grid, 1, &mut rows);
        assert_eq!(ns(&rows), vec![30, 20, 10]);
        assert_eq!(grid.sort_state(), Some(&SortState::new("n", SortOrder::Descending)));

        label_click(&mut grid, 1, &mut rows);
        assert_eq!(ns(&rows), vec![10, 20, 30]);
    }

    #[test_case(1 ; "one click")]
    #[test_case(2 ; "two clicks")]
    #[test_case(7 ; "seven clicks")]
    #[test_case(12 ; "twelve clicks")]
    fn test_orders_strictly_alternate(clicks: usize) {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = numbers(&[2, 3, 1]);
        for _ in 0..clicks {
            label_click(&mut grid, 1, &mut rows);
        }
        let expected = if clicks % 2 == 1 {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        };
        assert_eq!(grid.sort_state().map(|s| s.order), Some(expected));
    }

    #[test]
    fn test_switching_columns_starts_ascending() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = vec![item(1, "c"), item(2, "a"), item(3, "b")];
        label_click(&mut grid, 1, &mut rows);
        label_click(&mut grid, 1, &mut rows);
        assert_eq!(grid.sort_state().map(|s| s.order), Some(SortOrder::Descending));

        let action = label_click(&mut grid, 2, &mut rows);
        assert_eq!(
            action,
            Some(GridAction::Sorted(SortState::new("label", SortOrder::Ascending)))
        );
        assert_eq!(ns(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = vec![item(0, "banana"), item(1, "Apple"), item(2, "cherry")];
        label_click(&mut grid, 2, &mut rows);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_constant_value_keeps_order() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = numbers(&[5, 1, 4, 2]);
        label_click(&mut grid, 3, &mut rows);
        assert_eq!(ns(&rows), vec![5, 1, 4, 2]);
        label_click(&mut grid, 3, &mut rows);
        assert_eq!(ns(&rows), vec![5, 1, 4, 2]);
        assert_eq!(grid.sort_state().map(|s| s.key.as_str()), Some("same"));
    }

    #[test]
    fn test_equal_keys_keep_relative_order() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = vec![item(2, "x"), item(1, "y"), item(2, "z"), item(1, "w")];
        label_click(&mut grid, 1, &mut rows);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["y", "w", "x", "z"]);
    }

    #[test]
    fn test_non_sortable_column_ignores_label_clicks() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = numbers(&[3, 1, 2]);
        assert_eq!(label_click(&mut grid, 0, &mut rows), None);
        assert_eq!(ns(&rows), vec![3, 1, 2]);
        assert_eq!(grid.sort_state(), None);
    }

    #[test]
    fn test_other_header_areas_do_not_sort() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows = numbers(&[3, 1, 2]);
        let event = PointerEvent::default();
        assert_eq!(grid.click(HitTarget::HeaderCell(1), &event, &mut rows), None);
        assert_eq!(grid.click(HitTarget::HeaderHandle(1), &event, &mut rows), None);
        assert_eq!(grid.click(HitTarget::None, &event, &mut rows), None);
        assert_eq!(ns(&rows), vec![3, 1, 2]);
    }

    #[test]
    fn test_manual_sort_off_disables_sorting() {
        let config = GridConfig {
            manual_sort: false,
            ..GridConfig::default()
        };
        let mut grid = Grid::new(schema(), config);
        let mut rows = numbers(&[3, 1, 2]);
        assert_eq!(label_click(&mut grid, 1, &mut rows), None);
        assert_eq!(ns(&rows), vec![3, 1, 2]);
        assert!(grid.header().iter().all(|h| h.sort_indicator.is_none()));
    }

    #[test]
    fn test_empty_rows_still_record_sort() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        let mut rows: Vec<Item> = Vec::new();
        assert!(label_click(&mut grid, 1, &mut rows).is_some());
        assert!(grid.body(&rows).is_empty());
    }
}

mod resizing {
    use super::*;

    #[test]
    fn test_drag_session_through_hit_test() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        grid.observe_container_width(1000);
        let before: Vec<u32> = grid.widths().iter().map(|(_, w)| w).collect();

        // right edge of "n" minus a few pixels
        let right = f64::from(grid.widths().left_edge(2));
        let target = grid.hit_test(right - 3.0, 10.0, 0);
        assert_eq!(target, HitTarget::HeaderHandle(1));
        assert!(grid.pointer_down(target));
        assert!(grid.is_resizing());

        let left = f64::from(grid.widths().left_edge(1));
        assert_eq!(grid.pointer_move(left + 450.0, left), Some(450));
        let after: Vec<u32> = grid.widths().iter().map(|(_, w)| w).collect();
        assert_eq!(after[1], 450);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[3], before[3]);

        assert!(grid.pointer_up());
        assert!(!grid.is_resizing());
        assert_eq!(grid.pointer_move(left + 600.0, left), None);
    }

    #[test]
    fn test_handle_class_tracks_drag() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        assert!(grid.header()[0].handle.is_none());
        grid.pointer_down(HitTarget::HeaderHandle(2));
        let classes: Vec<Option<String>> = grid
            .header()
            .iter()
            .map(|h| h.handle.map(|handle| handle.class_name()))
            .collect();
        assert_eq!(
            classes,
            vec![
                None,
                Some("table-header-cell-separator _hoverable".to_string()),
                Some("table-header-cell-separator _hoverable _resizing".to_string()),
                Some("table-header-cell-separator _hoverable".to_string()),
            ]
        );
    }

    #[test]
    fn test_fixed_column_has_no_handle() {
        let mut grid = Grid::new(schema(), GridConfig::default());
        assert!(!grid.pointer_down(HitTarget::HeaderHandle(0)));
        assert_eq!(grid.hit_test(58.0, 10.0, 0), HitTarget::HeaderLabel(0));
    }
}

mod cells {
    use super::*;

    fn recording_grid() -> (Grid<Item>, Rc<RefCell<Vec<i64>>>) {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicks);
        let grid = Grid::new(schema(), GridConfig::default())
            .on_cell_click(move |_, row: &Item| sink.borrow_mut().push(row.n));
        (grid, clicks)
    }

    #[test]
    fn test_clickable_cell_reports_row() {
        let (mut grid, clicks) = recording_grid();
        let mut rows = numbers(&[7, 8, 9]);
        let y = f64::from(grid.config().header_height) + f64::from(grid.config().row_height) + 1.0;
        let event = PointerEvent::at(100.0, y);
        let target = grid.hit_test(event.x, event.y, rows.len());
        assert_eq!(target, HitTarget::Cell { row: 1, column: 1 });
        assert_eq!(
            grid.click(target, &event, &mut rows),
            Some(GridAction::CellClicked { row: 1, column: 1 })
        );
        assert_eq!(*clicks.borrow(), vec![8]);
    }

    #[test]
    fn test_non_clickable_cell_is_silent() {
        let (mut grid, clicks) = recording_grid();
        let mut rows = numbers(&[7]);
        let target = HitTarget::Cell { row: 0, column: 0 };
        assert_eq!(grid.click(target, &PointerEvent::default(), &mut rows), None);
        assert!(clicks.borrow().is_empty());
    }

    #[test]
    fn test_cell_click_after_sort_sees_sorted_row() {
        let (mut grid, clicks) = recording_grid();
        let mut rows = numbers(&[30, 10, 20]);
        label_click(&mut grid, 1, &mut rows);
        grid.click(HitTarget::Cell { row: 0, column: 2 }, &PointerEvent::default(), &mut rows);
        assert_eq!(*clicks.borrow(), vec![10]);
    }

    #[test]
    fn test_cell_renderer_receives_index() {
        let columns = vec![ColumnDescriptor::new("i", |_: &Item, i| i.to_string().into())];
        let grid = Grid::new(columns, GridConfig::default());
        let rows = numbers(&[5, 6, 7]);
        let body = grid.body(&rows);
        let rendered: Vec<CellContent> = body.rows.iter().map(|r| r.cells[0].content.clone()).collect();
        assert_eq!(
            rendered,
            vec![CellContent::text("0"), CellContent::text("1"), CellContent::text("2")]
        );
    }
}

mod rows {
    use super::*;

    #[test]
    fn test_row_class_map() {
        let grid = Grid::new(schema(), GridConfig::default())
            .row_class("_negative", |r: &Item, _| r.n < 0)
            .row_class("_first", |_, i| i == 0);
        let rows = numbers(&[-1, 4, -2]);
        let classes: Vec<String> = grid.body(&rows).rows.into_iter().map(|r| r.class_name).collect();
        assert_eq!(
            classes,
            vec![
                "table-row _negative _first".to_string(),
                "table-row".to_string(),
                "table-row _negative".to_string(),
            ]
        );
    }

    #[test]
    fn test_only_visible_rows_are_rendered() {
        let config = GridConfig {
            row_height: 50,
            header_height: 50,
            overscan: 1,
            ..GridConfig::default()
        };
        let mut grid = Grid::new(schema(), config);
        grid.set_viewport_height(250.0);
        let rows = numbers(&(0..10_000).collect::<Vec<_>>());

        let body = grid.body(&rows);
        assert_eq!(body.rows.len(), 5);
        assert_eq!(body.padding_top, 0.0);
        assert_eq!(body.padding_bottom, 50.0 * 9_995.0);

        grid.scroll_to_index(5_000, rows.len());
        let body = grid.body(&rows);
        let indices: Vec<usize> = body.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, (4_999..5_005).collect::<Vec<_>>());
        assert_eq!(body.rows[1].cells[1].content, CellContent::text("5000"));

        grid.scroll_by(-1_000_000.0, rows.len());
        assert_eq!(grid.visible_range(rows.len()), 0..5);
    }

    /// Mounts every row, whatever the scroll position
    struct MountAll;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    impl Virtualizer for MountAll {
        fn set_viewport_height(&mut self, _height: f64) {}

        fn visible_range(&self, row_count: usize) -> Range<usize> {
            0..row_count
        }

        fn scroll_offset(&self) -> f64 {
            0.0
        }

        fn set_scroll_offset(&mut self, _offset: f64, _row_count: usize) {}

        fn scroll_to_index(&mut self, _index: usize, _row_count: usize) {}

        fn padding(&self, _row_count: usize) -> (f64, f64) {
            (0.0, 0.0)
        }

        fn row_at(&self, y: f64, row_count: usize) -> Option<usize> {
            let row = (y / 10.0).floor();
            (row >= 0.0 && row < row_count as f64).then_some(row as usize)
        }
    }

    #[test]
    fn test_host_supplied_virtualizer() {
        let mut grid = Grid::with_virtualizer(schema(), GridConfig::default(), Box::new(MountAll));
        let rows = numbers(&(0..300).collect::<Vec<_>>());
        grid.scroll_to_index(250, rows.len());
        assert_eq!(grid.body(&rows).rows.len(), 300);
    }
}
