use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Minimum column width in pixels
pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 100;

/// Default body row height in pixels
pub const DEFAULT_ROW_HEIGHT: u32 = 72;

/// Default header row height in pixels
pub const DEFAULT_HEADER_HEIGHT: u32 = 72;

/// Rows mounted above and below the viewport to reduce popping during scroll
pub const DEFAULT_OVERSCAN: usize = 4;

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Smallest width any resizable column can take
    pub min_column_width: u32,
    /// Fixed height of every body row
    pub row_height: u32,
    /// Height of the header row
    pub header_height: u32,
    /// Whether header label clicks sort the rows
    pub manual_sort: bool,
    /// Extra rows rendered beyond the visible window
    pub overscan: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
            manual_sort: true,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl GridConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error for malformed JSON or a zero row height / minimum width.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `GridError::Config` for values the layout cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.row_height == 0 {
            return Err(GridError::Config("rowHeight must be positive".into()));
        }
        if self.min_column_width == 0 {
            return Err(GridError::Config("minColumnWidth must be positive".into()));
        }
        Ok(())
    }
}
