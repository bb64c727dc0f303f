//! Layout engine for column widths and row windowing.
//!
//! This module handles:
//! - Turning column width hints into pixel widths that fill the container
//! - Live column resizing from drag handles
//! - Deciding which rows are mounted for the current scroll position

mod column_widths;
mod viewport;

pub use column_widths::{initial_width, ColumnWidths};
pub use viewport::{Viewport, Virtualizer};
