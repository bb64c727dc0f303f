//! Structured error types for datagrid.
//!
//! The grid core itself never fails: bad hints and incomparable values degrade
//! silently. Errors only come from the edges (JSON decoding, DOM wiring, I/O).

/// All errors that can occur while configuring or mounting a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// JSON decoding error for configs, schemas or row payloads.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value that cannot be honoured.
    #[error("Invalid config: {0}")]
    Config(String),

    /// A column key that is not part of the schema.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// DOM construction or listener registration failure.
    #[error("DOM error: {0}")]
    Dom(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GridError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn read(path: &str) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    #[test]
    fn test_io_errors_convert() {
        let err = read("/nonexistent/datagrid/users.json").unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
        assert!(err.to_string().starts_with("I/O error: "));
    }

    #[test]
    fn test_json_errors_convert() {
        let err = crate::GridConfig::from_json("{").unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }
}
