//! Comparator factory for header-driven sorting.
//!
//! Text compares with a primary-strength collator (case and accent
//! insensitive), numbers compare numerically. Anything else is reported as
//! equal so a badly typed column never reorders or crashes the view.

use std::cmp::Ordering;
use std::fmt;

use icu::collator::options::{CollatorOptions, Strength};
use icu::collator::{Collator, CollatorBorrowed};

use crate::types::{SortOrder, SortValue, ValueSource};

/// Locale-aware, case-insensitive string comparison.
pub struct TextCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl Default for TextCollator {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCollator {
    pub fn new() -> Self {
        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Primary);
        let collator = match Collator::try_new(Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                log::warn!("collation data unavailable, using lowercase ordering: {e}");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

impl fmt::Debug for TextCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCollator")
            .field("icu", &self.collator.is_some())
            .finish()
    }
}

/// Ascending comparison of two sort values.
///
/// Mixed types and NaN compare equal.
pub fn compare_values(collator: &TextCollator, a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => collator.compare(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Build a row comparator for `order` over the values `source` yields.
///
/// The result is a strict weak ordering suitable for `slice::sort_by`.
pub fn sort_by<R>(order: SortOrder, source: &ValueSource<R>) -> impl Fn(&R, &R) -> Ordering + '_ {
    let collator = TextCollator::new();
    move |a, b| match (source.value_of(a), source.value_of(b)) {
        (Some(a), Some(b)) => order.apply(compare_values(&collator, &a, &b)),
        _ => Ordering::Equal,
    }
}
