//! Data types shared by the grid, the layout engine and hosts.

mod column;
mod config;
mod sort;
mod value;

pub use column::*;
pub use config::*;
pub use sort::*;
pub use value::*;
