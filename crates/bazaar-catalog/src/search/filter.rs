//! User-controlled filter state.

use std::collections::BTreeSet;

use crate::catalog::Source;
use crate::search::SortOption;
use serde::{Deserialize, Serialize};

/// Inclusive price bounds. An unset bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Build a range from free-text inputs.
    ///
    /// Blank, non-numeric and NaN inputs leave the bound unset.
    pub fn from_inputs(min: &str, max: &str) -> Self {
        Self {
            min: parse_bound(min),
            max: parse_bound(max),
        }
    }

    /// Check whether `price` is within the bounds.
    pub fn contains(&self, price: f64) -> bool {
        let min = self.min.unwrap_or(0.0);
        let max = self.max.unwrap_or(f64::INFINITY);
        price >= min && price <= max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

fn parse_bound(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
}

/// Filters applied on top of page, category and search text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Allowed sources. Empty allows every source.
    #[serde(default)]
    pub sources: BTreeSet<Source>,
    #[serde(default)]
    pub price_range: PriceRange,
    /// Minimum rating, 0 disables the filter.
    #[serde(default)]
    pub min_rating: f64,
    #[serde(default)]
    pub sort_by: SortOption,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources = sources.into_iter().collect();
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_sort(mut self, sort_by: SortOption) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Add `source` if absent, remove it if present.
    pub fn toggle_source(&mut self, source: Source) {
        if !self.sources.remove(&source) {
            self.sources.insert(source);
        }
    }

    pub fn remove_source(&mut self, source: Source) {
        self.sources.remove(&source);
    }

    /// Clear every filter and restore relevance order.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of active filters, for badge display.
    ///
    /// A non-empty source set, a bounded price range, a rating threshold and
    /// a non-relevance sort count one each.
    pub fn active_count(&self) -> usize {
        let mut count = usize::from(!self.sources.is_empty());
        if !self.price_range.is_unbounded() {
            count += 1;
        }
        if self.min_rating > 0.0 {
            count += 1;
        }
        if self.sort_by != SortOption::Relevance {
            count += 1;
        }
        count
    }

    pub(crate) fn allows_source(&self, source: Source) -> bool {
        self.sources.is_empty() || self.sources.contains(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_inputs() {
        assert_eq!(
            PriceRange::from_inputs("100", " 500 "),
            PriceRange::new(Some(100.0), Some(500.0))
        );
        assert_eq!(PriceRange::from_inputs("", "abc"), PriceRange::default());
        assert_eq!(PriceRange::from_inputs("NaN", "").min, None);
    }

    #[test]
    fn test_price_contains_inclusive() {
        let range = PriceRange::new(Some(100.0), Some(500.0));
        assert!(range.contains(100.0));
        assert!(range.contains(500.0));
        assert!(!range.contains(99.99));
        assert!(!range.contains(500.01));

        let open = PriceRange::new(None, None);
        assert!(open.contains(0.0));
        assert!(open.contains(1_000_000.0));
    }

    #[test]
    fn test_source_set_counts_once() {
        let filters =
            FilterState::new().with_sources([Source::Amazon, Source::Flipkart, Source::Meesho]);
        assert_eq!(filters.active_count(), 1);

        let filters = filters.with_price_range(PriceRange::new(None, Some(500.0)));
        assert_eq!(filters.active_count(), 2);
    }

    #[test]
    fn test_toggle_and_count() {
        let mut filters = FilterState::new();
        assert_eq!(filters.active_count(), 0);

        filters.toggle_source(Source::Amazon);
        filters.toggle_source(Source::Meesho);
        filters.min_rating = 4.0;
        filters.sort_by = SortOption::PriceLow;
        assert_eq!(filters.active_count(), 3);

        filters.toggle_source(Source::Amazon);
        assert!(!filters.sources.contains(&Source::Amazon));
        filters.remove_source(Source::Meesho);
        assert!(filters.sources.is_empty());

        filters.price_range = PriceRange::new(None, Some(300.0));
        assert_eq!(filters.active_count(), 3);

        filters.reset();
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"sources":["Amazon"],"priceRange":{"min":100},"minRating":3,"sortBy":"price_high"}"#;
        let filters: FilterState = serde_json::from_str(json).unwrap();
        assert_eq!(filters.sort_by, SortOption::PriceHigh);
        assert_eq!(filters.price_range.min, Some(100.0));
        assert!(filters.allows_source(Source::Amazon));
        assert!(!filters.allows_source(Source::Flipkart));
    }
}
