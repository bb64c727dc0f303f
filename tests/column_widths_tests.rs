//! Column width allocation tests for datagrid
//!
//! Covers initial widths, reflow to the container, scrollbar reservation and
//! drag resizing.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_lossless,
    clippy::cast_possible_wrap
)]

use datagrid::{ColumnOptions, ColumnWidths};

const MIN: u32 = 100;

fn col(key: &str, width: Option<u32>, resizable: bool) -> ColumnOptions {
    ColumnOptions {
        requested_width: width,
        resizable,
        ..ColumnOptions::new(key)
    }
}

fn demo_like() -> Vec<ColumnOptions> {
    vec![
        col("actions", Some(100), false),
        col("avatar", Some(100), false),
        col("name", Some(180), true),
        col("surname", Some(180), true),
        col("gender", Some(75), true),
        col("age", Some(75), true),
        col("birthday", Some(100), true),
        col("email", Some(300), true),
        col("phone", Some(100), true),
    ]
}

fn widths(w: &ColumnWidths) -> Vec<u32> {
    w.iter().map(|(_, w)| w).collect()
}

mod reflow {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_fixed_column_below_minimum_is_kept() {
        let columns = [col("a", Some(50), false), col("b", None, true), col("c", None, true)];
        let mut w = ColumnWidths::new(&columns, MIN);
        w.reflow(500);
        assert_eq!(widths(&w), vec![50, 225, 225]);
    }

    #[test_case(900 ; "narrower than hints")]
    #[test_case(1260 ; "exactly the hints")]
    #[test_case(1333 ; "odd width")]
    #[test_case(1920 ; "full hd")]
    #[test_case(4000 ; "very wide")]
    fn test_widths_sum_to_container(container: u32) {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        w.reflow(container);
        assert_eq!(w.total_width(), container);
    }

    #[test_case(0 ; "no scrollbar")]
    #[test_case(15 ; "classic scrollbar")]
    #[test_case(17 ; "windows scrollbar")]
    fn test_scrollbar_is_reserved(scrollbar: u32) {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        w.measure_scrollbar((1000 + scrollbar) as i32, 1000);
        w.reflow(1400);
        assert_eq!(w.total_width(), 1400 - scrollbar);
    }

    #[test]
    fn test_scrollbar_appears_later() {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        w.measure_scrollbar(1000, 1000);
        w.reflow(1400);
        assert_eq!(w.total_width(), 1400);

        w.measure_scrollbar(1000, 983);
        w.reflow(1400);
        assert_eq!(w.total_width(), 1383);
        assert_eq!(w.scrollbar_width(), Some(17));
    }

    #[test_case(300 ; "far too narrow")]
    #[test_case(800 ; "slightly too narrow")]
    #[test_case(1000 ; "roomy")]
    fn test_resizable_columns_respect_minimum(container: u32) {
        let columns = demo_like();
        let mut w = ColumnWidths::new(&columns, MIN);
        w.reflow(container);
        for (column, width) in columns.iter().zip(widths(&w)) {
            if column.resizable {
                assert!(width >= MIN, "{} is {width}px", column.key);
            }
        }
    }

    #[test]
    fn test_overflow_is_accepted_at_minimum() {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        w.reflow(300);
        assert_eq!(widths(&w), vec![100, 100, 100, 100, 100, 100, 100, 100, 100]);
        assert!(w.total_width() > 300);
    }

    #[test_case(640)]
    #[test_case(1024)]
    #[test_case(2048)]
    fn test_non_resizable_columns_never_change(container: u32) {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        w.reflow(container);
        assert_eq!(w.width("actions"), Some(100));
        assert_eq!(w.width("avatar"), Some(100));
    }

    #[test_case(700)]
    #[test_case(1111)]
    #[test_case(1920)]
    fn test_reflow_is_idempotent(container: u32) {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        w.reflow(container);
        let first = widths(&w);
        w.reflow(container);
        assert_eq!(widths(&w), first);
    }

    #[test]
    fn test_reflow_keeps_dragged_proportions() {
        let columns = [col("a", None, true), col("b", None, true)];
        let mut w = ColumnWidths::new(&columns, MIN);
        w.reflow(400);
        assert!(w.begin_drag(0));
        w.drag_to(300.0, 0.0);
        w.end_drag();
        assert_eq!(widths(&w), vec![300, 200]);

        // 3:2 split survives the next container change
        w.reflow(1000);
        assert_eq!(widths(&w), vec![600, 400]);
    }

    #[test]
    fn test_all_fixed_schema_is_left_alone() {
        let columns = [col("a", Some(50), false), col("b", None, false)];
        let mut w = ColumnWidths::new(&columns, MIN);
        w.reflow(1000);
        assert_eq!(widths(&w), vec![50, 100]);
    }
}

mod initial {
    use super::*;
    use test_case::test_case;

    #[test_case(Some(40), true, 100 ; "resizable below minimum")]
    #[test_case(Some(100), true, 100 ; "resizable at minimum")]
    #[test_case(Some(180), true, 180 ; "resizable above minimum")]
    #[test_case(None, true, 100 ; "resizable without hint")]
    #[test_case(Some(50), false, 50 ; "fixed below minimum")]
    #[test_case(None, false, 100 ; "fixed without hint")]
    fn test_initial_width(hint: Option<u32>, resizable: bool, expected: u32) {
        assert_eq!(datagrid::layout::initial_width(&col("x", hint, resizable), MIN), expected);
    }

    #[test]
    fn test_unobserved_container_keeps_hints() {
        let w = ColumnWidths::new(&demo_like(), MIN);
        assert_eq!(
            widths(&w),
            vec![100, 100, 180, 180, 100, 100, 100, 300, 100]
        );
    }
}

mod drag {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_drag_changes_only_the_dragged_column() {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        w.reflow(1600);
        let before = widths(&w);
        assert!(w.begin_drag(7));

        let left = f64::from(w.left_edge(7));
        assert_eq!(w.drag_to(left + 512.4, left), Some(512));
        let after = widths(&w);
        for (i, (a, b)) in before.iter().zip(&after).enumerate() {
            if i != 7 {
                assert_eq!(a, b, "column {i} moved");
            }
        }
        assert_eq!(w.end_drag(), Some(7));
    }

    #[test_case(-500.0 ; "pointer left of the column")]
    #[test_case(20.0 ; "pointer inside the minimum")]
    #[test_case(f64::NAN ; "no pointer position")]
    fn test_drag_clamps_to_minimum(offset: f64) {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        assert!(w.begin_drag(2));
        assert_eq!(w.drag_to(offset, 0.0), Some(MIN));
    }

    #[test]
    fn test_fixed_columns_cannot_be_dragged() {
        let mut w = ColumnWidths::new(&demo_like(), MIN);
        assert!(!w.begin_drag(0));
        assert!(!w.begin_drag(99));
        assert_eq!(w.active_drag(), None);
        assert_eq!(w.drag_to(500.0, 0.0), None);
    }
}
