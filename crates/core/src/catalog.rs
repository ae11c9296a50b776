//! Product catalog model and providers.
//!
//! The catalog is owned by an external collaborator. Bazaar only reads it
//! through [`CatalogProvider`]; it never fetches or caches products itself.
//! [`SampleCatalog`] ships the demonstration data, and [`FilterFacets`]
//! holds the reference lists the filter sidebar offers.

use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// Errors raised when catalog data is unusable.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("Product {id} has rating {rating} outside 0..=5")]
    InvalidRating { id: ProductId, rating: f64 },
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// A product as supplied by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub image_ref: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    pub in_stock: bool,
    #[serde(default)]
    pub is_wishlisted: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub seller_type: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub shipping_tags: Vec<String>,
}

impl Product {
    /// Markdown against the original price, rounded to a whole percent.
    ///
    /// Zero when there is no original price or it isn't above the current one.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        let Some(original) = self.original_price else {
            return 0;
        };
        if original <= self.price || original.is_zero() {
            return 0;
        }

        ((original - self.price) / original * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }

    /// Flip the wishlist flag. Out-of-stock products can't be wishlisted.
    pub fn toggle_wishlist(&mut self) -> bool {
        if self.in_stock {
            self.is_wishlisted = !self.is_wishlisted;
        }
        self.is_wishlisted
    }
}

/// Source of the product collection the filter evaluator operates on.
pub trait CatalogProvider {
    /// Return every product in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog can't be read or contains invalid data.
    fn products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Check catalog invariants: unique IDs, non-negative prices, ratings in range.
///
/// # Errors
///
/// Returns the first violation found, in catalog order.
pub fn validate_products(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(&product.id) {
            return Err(CatalogError::DuplicateId(product.id.clone()));
        }
        if product.price.is_sign_negative() && !product.price.is_zero() {
            return Err(CatalogError::NegativePrice(product.id.clone()));
        }
        if !(0.0..=MAX_RATING).contains(&product.rating) {
            return Err(CatalogError::InvalidRating {
                id: product.id.clone(),
                rating: product.rating,
            });
        }
    }
    Ok(())
}

/// Built-in demonstration catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCatalog;

impl SampleCatalog {
    /// The six demonstration products.
    #[must_use]
    pub fn sample_products() -> Vec<Product> {
        vec![
            sample(
                "1",
                "Wireless Bluetooth Headphones with Active Noise Cancellation",
                "TechSound",
                (8999, Some(12999)),
                (4.5, 1247),
                Some("TechSound Official"),
                true,
                ("Electronics", "prime", "new", &["free", "prime-eligible"]),
            ),
            sample(
                "2",
                "Smart Fitness Watch with Heart Rate Monitor",
                "FitTrack",
                (19999, None),
                (4.3, 892),
                Some("FitTrack Store"),
                true,
                ("Electronics", "amazon-choice", "new", &["free"]),
            ),
            sample(
                "3",
                "Portable Bluetooth Speaker - Waterproof",
                "SoundWave",
                (4999, Some(7999)),
                (4.7, 2156),
                Some("SoundWave Direct"),
                true,
                ("Electronics", "prime", "new", &["same-day", "prime-eligible"]),
            ),
            sample(
                "4",
                "USB-C Fast Charging Cable 6ft",
                "ChargeMax",
                (1499, Some(2499)),
                (4.2, 567),
                None,
                false,
                ("Phones & Accessories", "third-party", "new", &[]),
            ),
            sample(
                "5",
                "Wireless Phone Charger Pad",
                "PowerUp",
                (2999, None),
                (4.4, 334),
                Some("PowerUp Official"),
                true,
                ("Phones & Accessories", "third-party", "refurbished", &["free"]),
            ),
            sample(
                "6",
                "Gaming Mechanical Keyboard RGB",
                "GamePro",
                (7999, Some(9999)),
                (4.6, 1123),
                Some("GamePro Store"),
                true,
                ("Computers", "amazon-choice", "used", &["prime-eligible"]),
            ),
        ]
    }
}

impl CatalogProvider for SampleCatalog {
    fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(Self::sample_products())
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    brand: &str,
    (price_cents, original_cents): (i64, Option<i64>),
    (rating, review_count): (f64, u32),
    seller: Option<&str>,
    in_stock: bool,
    (category, seller_type, condition, shipping): (&str, &str, &str, &[&str]),
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        brand: brand.to_owned(),
        image_ref: "/api/placeholder/300/400".to_owned(),
        price: Decimal::new(price_cents, 2),
        original_price: original_cents.map(|cents| Decimal::new(cents, 2)),
        rating,
        review_count,
        seller: seller.map(str::to_owned),
        in_stock,
        is_wishlisted: false,
        category: category.to_owned(),
        seller_type: seller_type.to_owned(),
        condition: condition.to_owned(),
        shipping_tags: shipping.iter().map(|tag| (*tag).to_owned()).collect(),
    }
}

// =============================================================================
// Filter facets
// =============================================================================

/// A brand offered in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandFacet {
    pub name: &'static str,
    pub count: u32,
    pub popular: bool,
}

/// A checkbox option in one of the sidebar's fixed lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub label: &'static str,
    pub value: &'static str,
    pub count: u32,
}

const fn option(label: &'static str, value: &'static str, count: u32) -> FacetOption {
    FacetOption {
        label,
        value,
        count,
    }
}

const fn brand(name: &'static str, count: u32, popular: bool) -> BrandFacet {
    BrandFacet {
        name,
        count,
        popular,
    }
}

/// Reference lists for the filter sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct FilterFacets {
    pub brands: Vec<BrandFacet>,
    pub ratings: Vec<FacetOption>,
    pub seller_types: Vec<FacetOption>,
    pub conditions: Vec<FacetOption>,
    pub shipping: Vec<FacetOption>,
}

/// Brands matching a sidebar brand search, split the way the sidebar shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BrandMatches<'a> {
    pub popular: Vec<&'a BrandFacet>,
    pub other: Vec<&'a BrandFacet>,
}

impl FilterFacets {
    /// The standard sidebar options.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            brands: vec![
                brand("Apple", 892, true),
                brand("Samsung", 743, true),
                brand("Nike", 654, true),
                brand("Sony", 521, true),
                brand("Adidas", 432, false),
                brand("Microsoft", 387, false),
                brand("Canon", 298, false),
                brand("Dell", 276, false),
                brand("HP", 234, false),
                brand("LG", 198, false),
            ],
            ratings: vec![
                option("4+ Stars", "4+", 8542),
                option("3+ Stars", "3+", 12387),
                option("2+ Stars", "2+", 15293),
                option("1+ Stars", "1+", 16842),
            ],
            seller_types: vec![
                option("Amazon's Choice", "amazon-choice", 1234),
                option("Prime", "prime", 8765),
                option("Third-party sellers", "third-party", 4321),
            ],
            conditions: vec![
                option("New", "new", 12450),
                option("Used", "used", 3420),
                option("Refurbished", "refurbished", 890),
            ],
            shipping: vec![
                option("Free shipping", "free", 9876),
                option("Same day delivery", "same-day", 2341),
                option("Prime eligible", "prime-eligible", 7654),
            ],
        }
    }

    /// Case-insensitive substring search over brand names.
    ///
    /// A blank query matches every brand.
    #[must_use]
    pub fn search_brands(&self, query: &str) -> BrandMatches<'_> {
        let needle = query.to_lowercase();
        let (popular, other): (Vec<&BrandFacet>, Vec<&BrandFacet>) = self
            .brands
            .iter()
            .filter(|b| needle.is_empty() || b.name.to_lowercase().contains(&needle))
            .partition(|b| b.popular);
        BrandMatches { popular, other }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_is_valid() {
        let products = SampleCatalog.products().unwrap();
        assert_eq!(products.len(), 6);
        assert!(validate_products(&products).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut products = SampleCatalog::sample_products();
        let first = products[0].clone();
        products.push(first);
        assert_eq!(
            validate_products(&products),
            Err(CatalogError::DuplicateId(ProductId::new("1")))
        );
    }

    #[test]
    fn test_validate_rejects_bad_rating_and_price() {
        let mut products = SampleCatalog::sample_products();
        products[1].rating = 5.5;
        assert!(matches!(
            validate_products(&products),
            Err(CatalogError::InvalidRating { .. })
        ));

        let mut products = SampleCatalog::sample_products();
        products[2].price = Decimal::new(-1, 0);
        assert_eq!(
            validate_products(&products),
            Err(CatalogError::NegativePrice(ProductId::new("3")))
        );
    }

    #[test]
    fn test_discount_percent() {
        let products = SampleCatalog::sample_products();
        // 129.99 -> 89.99 is 30.77%
        assert_eq!(products[0].discount_percent(), 31);
        // no original price
        assert_eq!(products[1].discount_percent(), 0);
        // 79.99 -> 49.99 is 37.5%
        assert_eq!(products[2].discount_percent(), 38);
    }

    #[test]
    fn test_toggle_wishlist() {
        let mut products = SampleCatalog::sample_products();
        assert!(products[0].toggle_wishlist());
        assert!(!products[0].toggle_wishlist());

        // cable is out of stock
        assert!(!products[3].toggle_wishlist());
    }

    #[test]
    fn test_search_brands() {
        let facets = FilterFacets::standard();

        let all = facets.search_brands("");
        assert_eq!(all.popular.len(), 4);
        assert_eq!(all.other.len(), 6);

        let matches = facets.search_brands("SO");
        let names: Vec<_> = matches.popular.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Sony"]);
        assert!(matches.other.is_empty());

        let matches = facets.search_brands("e");
        assert!(matches.popular.iter().any(|b| b.name == "Apple"));
        assert!(matches.other.iter().any(|b| b.name == "Dell"));
    }

    #[test]
    fn test_product_deserializes_with_defaults() {
        let json = r#"{"id":"9","name":"Mug","brand":"Acme","price":"4.50","rating":3.5,"inStock":true}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::new(450, 2));
        assert!(product.shipping_tags.is_empty());
        assert_eq!(product.discount_percent(), 0);
    }
}
