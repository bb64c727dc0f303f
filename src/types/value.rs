use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A value a column exposes for ordering rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for SortValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for SortValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for SortValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Per-row value extractor.
pub type ValueExtractor<R> = Box<dyn Fn(&R) -> SortValue>;

/// Where a column's sort value comes from.
///
/// `None` and `Constant` never reorder rows: the comparator sees either no
/// value or the same value on both sides.
pub enum ValueSource<R> {
    None,
    Constant(SortValue),
    Extract(ValueExtractor<R>),
}

impl<R> Default for ValueSource<R> {
    fn default() -> Self {
        Self::None
    }
}

impl<R> ValueSource<R> {
    /// Build an extracting source from a closure.
    pub fn extract(f: impl Fn(&R) -> SortValue + 'static) -> Self {
        Self::Extract(Box::new(f))
    }

    /// Resolve the value for one row.
    pub fn value_of(&self, row: &R) -> Option<Cow<'_, SortValue>> {
        match self {
            Self::None => None,
            Self::Constant(value) => Some(Cow::Borrowed(value)),
            Self::Extract(f) => Some(Cow::Owned(f(row))),
        }
    }
}

impl<R> fmt::Debug for ValueSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Extract(_) => f.write_str("Extract(..)"),
        }
    }
}

/// Displayable content produced by cell and header renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent {
    #[default]
    Empty,
    /// Plain text, inserted as a text node.
    Text(String),
    /// Trusted markup from the host (icons, images).
    Html(String),
}

impl CellContent {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) | Self::Html(s) => s.is_empty(),
        }
    }

    /// Text with any markup tags removed.
    pub fn plain_text(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Html(s) => Cow::Owned(strip_tags(s)),
        }
    }
}

impl From<String> for CellContent {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CellContent {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_value_source_resolution() {
        let none: ValueSource<u32> = ValueSource::None;
        assert!(none.value_of(&1).is_none());

        let constant: ValueSource<u32> = ValueSource::Constant("x".into());
        assert_eq!(constant.value_of(&1).as_deref(), Some(&SortValue::Text("x".into())));

        let doubled: ValueSource<u32> = ValueSource::extract(|n: &u32| (n * 2).into());
        assert_eq!(doubled.value_of(&4).as_deref(), Some(&SortValue::Number(8.0)));
    }

    #[test]
    fn test_sort_value_untagged_json() {
        let values: Vec<SortValue> = serde_json::from_str(r#"[3, "b"]"#).unwrap();
        assert_eq!(values, vec![SortValue::Number(3.0), SortValue::Text("b".into())]);
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let content = CellContent::html(r#"<div class="avatar"><img src="a.png"/> Jo</div>"#);
        assert_eq!(content.plain_text(), "Jo");
        assert_eq!(CellContent::text("<b>").plain_text(), "<b>");
        assert!(CellContent::Empty.is_empty());
    }
}
