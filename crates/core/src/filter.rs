//! Product filtering and free-text search.
//!
//! [`FilterCriteria::apply`] is a pure, order-preserving filter. Each set
//! dimension passes everything while empty; once a set has members, a
//! product must match one of them. Dimensions are ANDed. Rating thresholds
//! are the exception to "match the attribute": a product passes if its
//! rating clears any selected threshold.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;

/// Category label meaning "don't narrow by category".
pub const ALL_CATEGORIES: &str = "All Categories";

/// Errors building filter criteria.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Price range minimum {min} is above maximum {max}")]
    InvertedPriceRange { min: Decimal, max: Decimal },
}

/// Inclusive price bounds with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(Decimal, Decimal)", into = "(Decimal, Decimal)")]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// Sidebar slider bounds.
    pub const DEFAULT_MIN: Decimal = Decimal::ZERO;
    pub const DEFAULT_MAX: Decimal = Decimal::ONE_THOUSAND;

    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns an error if `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, FilterError> {
        if min > max {
            return Err(FilterError::InvertedPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> Decimal {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Decimal {
        self.max
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl TryFrom<(Decimal, Decimal)> for PriceRange {
    type Error = FilterError;

    fn try_from((min, max): (Decimal, Decimal)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<PriceRange> for (Decimal, Decimal) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

/// Minimum rating encoded by a threshold label such as `"4+"`.
///
/// Returns `None` for labels that don't parse.
#[must_use]
pub fn parse_rating_threshold(label: &str) -> Option<f64> {
    let number = label.trim().strip_suffix('+').unwrap_or(label).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A set-valued filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Category,
    Brand,
    Rating,
    SellerType,
    Condition,
    Shipping,
}

/// Everything the filter sidebar can select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub categories: BTreeSet<String>,
    pub price_range: PriceRange,
    pub brands: BTreeSet<String>,
    pub min_rating_thresholds: BTreeSet<String>,
    pub seller_types: BTreeSet<String>,
    pub conditions: BTreeSet<String>,
    pub shipping_tags: BTreeSet<String>,
}

fn passes(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

impl FilterCriteria {
    /// No filters: every set empty and the default price range.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `product` passes every dimension.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        passes(&self.categories, &product.category)
            && passes(&self.brands, &product.brand)
            && passes(&self.seller_types, &product.seller_type)
            && passes(&self.conditions, &product.condition)
            && (self.shipping_tags.is_empty()
                || product
                    .shipping_tags
                    .iter()
                    .any(|tag| self.shipping_tags.contains(tag)))
            && self.price_range.contains(product.price)
            && self.meets_rating(product.rating)
    }

    fn meets_rating(&self, rating: f64) -> bool {
        self.min_rating_thresholds.is_empty()
            || self
                .min_rating_thresholds
                .iter()
                .filter_map(|label| parse_rating_threshold(label))
                .any(|threshold| rating >= threshold)
    }

    /// Products passing every dimension, in their original order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }

    /// Number of active selections, counting a moved price range as one.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.categories.len()
            + self.brands.len()
            + self.min_rating_thresholds.len()
            + self.seller_types.len()
            + self.conditions.len()
            + self.shipping_tags.len()
            + usize::from(!self.price_range.is_default())
    }

    /// Reset every dimension.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Category => &mut self.categories,
            FilterDimension::Brand => &mut self.brands,
            FilterDimension::Rating => &mut self.min_rating_thresholds,
            FilterDimension::SellerType => &mut self.seller_types,
            FilterDimension::Condition => &mut self.conditions,
            FilterDimension::Shipping => &mut self.shipping_tags,
        }
    }

    /// Check or uncheck `value`. Returns whether it is now selected.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) -> bool {
        let set = self.set_mut(dimension);
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_owned());
            true
        }
    }

    /// Remove a single selection (the "x" on an active-filter chip).
    pub fn remove_value(&mut self, dimension: FilterDimension, value: &str) -> bool {
        self.set_mut(dimension).remove(value)
    }

    /// Put the price range back to its default bounds.
    pub fn reset_price_range(&mut self) {
        self.price_range = PriceRange::default();
    }
}

/// Case-insensitive substring search on product name or brand.
///
/// A blank query returns every product.
#[must_use]
pub fn search(products: &[Product], query: &str) -> Vec<Product> {
    search_in_category(products, query, None)
}

/// [`search`], optionally narrowed to a category.
///
/// `None` and [`ALL_CATEGORIES`] leave the category unconstrained; otherwise
/// the product's category must match case-insensitively.
#[must_use]
pub fn search_in_category(
    products: &[Product],
    query: &str,
    category: Option<&str>,
) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    let category = category.filter(|c| *c != ALL_CATEGORIES);

    products
        .iter()
        .filter(|product| {
            needle.is_empty()
                || product.name.to_lowercase().contains(&needle)
                || product.brand.to_lowercase().contains(&needle)
        })
        .filter(|product| category.is_none_or(|c| product.category.eq_ignore_ascii_case(c)))
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::SampleCatalog;
    use crate::types::ProductId;

    fn rated(id: &str, rating: f64) -> Product {
        let mut product = SampleCatalog::sample_products().remove(0);
        product.id = ProductId::new(id);
        product.rating = rating;
        product
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let products = SampleCatalog::sample_products();
        let filtered = FilterCriteria::new().apply(&products);
        assert_eq!(filtered, products);
    }

    #[test]
    fn test_rating_threshold() {
        let products = vec![rated("a", 3.0), rated("b", 4.0), rated("c", 4.5)];
        let criteria = FilterCriteria {
            min_rating_thresholds: set(&["4+"]),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&criteria.apply(&products)), vec!["b", "c"]);
    }

    #[test]
    fn test_rating_thresholds_are_disjunctive() {
        let products = vec![rated("a", 2.5), rated("b", 3.2), rated("c", 4.8)];
        let criteria = FilterCriteria {
            min_rating_thresholds: set(&["4+", "3+"]),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&criteria.apply(&products)), vec!["b", "c"]);
    }

    #[test]
    fn test_unparseable_threshold_never_matches() {
        let products = vec![rated("a", 5.0)];
        let criteria = FilterCriteria {
            min_rating_thresholds: set(&["lots"]),
            ..FilterCriteria::default()
        };
        assert!(criteria.apply(&products).is_empty());
        assert_eq!(parse_rating_threshold("4+"), Some(4.0));
        assert_eq!(parse_rating_threshold("4.5+"), Some(4.5));
        assert_eq!(parse_rating_threshold("+"), None);
    }

    #[test]
    fn test_brand_set() {
        let products = SampleCatalog::sample_products();
        let criteria = FilterCriteria {
            brands: set(&["GamePro", "FitTrack"]),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&criteria.apply(&products)), vec!["2", "6"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let products = SampleCatalog::sample_products();
        let criteria = FilterCriteria {
            price_range: PriceRange::new(Decimal::new(2999, 2), Decimal::new(8999, 2)).unwrap(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&criteria.apply(&products)), vec!["1", "3", "5", "6"]);
    }

    #[test]
    fn test_dimensions_are_anded() {
        let products = SampleCatalog::sample_products();
        let criteria = FilterCriteria {
            categories: set(&["Electronics"]),
            seller_types: set(&["prime"]),
            shipping_tags: set(&["same-day"]),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&criteria.apply(&products)), vec!["3"]);

        let criteria = FilterCriteria {
            conditions: set(&["used"]),
            categories: set(&["Electronics"]),
            ..FilterCriteria::default()
        };
        assert!(criteria.apply(&products).is_empty());
    }

    #[test]
    fn test_shipping_matches_any_tag() {
        let products = SampleCatalog::sample_products();
        let criteria = FilterCriteria {
            shipping_tags: set(&["prime-eligible"]),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&criteria.apply(&products)), vec!["1", "3", "6"]);
    }

    #[test]
    fn test_inverted_price_range_rejected() {
        assert_eq!(
            PriceRange::new(Decimal::TEN, Decimal::ONE),
            Err(FilterError::InvertedPriceRange {
                min: Decimal::TEN,
                max: Decimal::ONE
            })
        );
        let parsed: Result<FilterCriteria, _> =
            serde_json::from_str(r#"{"priceRange":["10","1"]}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_criteria_deserialize_partial() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"brands":["Sony","Sony"],"minRatingThresholds":["4+"]}"#)
                .unwrap();
        assert_eq!(criteria.brands.len(), 1);
        assert!(criteria.price_range.is_default());
        assert_eq!(criteria.active_filter_count(), 2);
    }

    #[test]
    fn test_active_filter_count_and_clear() {
        let mut criteria = FilterCriteria::new();
        assert_eq!(criteria.active_filter_count(), 0);

        criteria.toggle(FilterDimension::Brand, "Sony");
        criteria.toggle(FilterDimension::Condition, "new");
        criteria.price_range = PriceRange::new(Decimal::ZERO, Decimal::ONE_HUNDRED).unwrap();
        assert_eq!(criteria.active_filter_count(), 3);

        criteria.reset_price_range();
        assert_eq!(criteria.active_filter_count(), 2);

        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_toggle_and_remove_value() {
        let mut criteria = FilterCriteria::new();
        assert!(criteria.toggle(FilterDimension::Rating, "4+"));
        assert!(!criteria.toggle(FilterDimension::Rating, "4+"));
        assert!(criteria.min_rating_thresholds.is_empty());

        criteria.toggle(FilterDimension::Shipping, "free");
        assert!(criteria.remove_value(FilterDimension::Shipping, "free"));
        assert!(!criteria.remove_value(FilterDimension::Shipping, "free"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut products = SampleCatalog::sample_products();
        products[0].name = "Wireless Bluetooth Headphones".to_owned();

        assert_eq!(ids(&search(&products, "head")), vec!["1"]);
        assert_eq!(ids(&search(&products, "HEAD")), vec!["1"]);
        // brand match
        assert_eq!(ids(&search(&products, "gamepro")), vec!["6"]);
        assert_eq!(ids(&search(&products, "bluetooth")), vec!["1", "3"]);
        assert!(search(&products, "toaster").is_empty());
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let products = SampleCatalog::sample_products();
        assert_eq!(search(&products, "   "), products);
    }

    #[test]
    fn test_search_in_category() {
        let products = SampleCatalog::sample_products();
        assert_eq!(
            ids(&search_in_category(&products, "wireless", Some("phones & accessories"))),
            vec!["5"]
        );
        assert_eq!(
            ids(&search_in_category(&products, "wireless", Some(ALL_CATEGORIES))),
            vec!["1", "5"]
        );
    }
}
