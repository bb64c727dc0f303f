//! datagrid - virtualized, resizable, sortable data grid for the web
//!
//! A table widget over host-owned rows, built for WebAssembly:
//! - Column widths that fill the container and follow drag handles
//! - Single-column sort from header clicks, reordering rows in place
//! - Row virtualization with a pluggable `Virtualizer`
//! - Headless core that also renders to text for native hosts
//!
//! # Usage (Rust)
//!
//! ```
//! use datagrid::{ColumnDescriptor, Grid, GridConfig};
//!
//! let columns = vec![
//!     ColumnDescriptor::new("n", |n: &u32, _| n.to_string().into()).value(|n| (*n).into()),
//! ];
//! let mut rows = vec![30, 10, 20];
//! let mut grid = Grid::new(columns, GridConfig::default());
//! grid.sort_by_key("n", &mut rows).ok();
//! assert_eq!(rows, vec![10, 20, 30]);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { UserGrid } from 'datagrid';
//! await init();
//! const grid = new UserGrid(wrapper, payload, { minColumnWidth: 100 });
//! ```

pub mod demo;
pub mod error;
pub mod grid;
pub mod layout;
pub mod sort;
pub mod types;

use wasm_bindgen::prelude::*;

pub use error::{GridError, Result};
pub use grid::Grid;
pub use layout::{ColumnWidths, Viewport, Virtualizer};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
