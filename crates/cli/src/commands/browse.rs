//! `bazaar browse` - search and filter the catalog.

use bazaar_core::filter::{ALL_CATEGORIES, FilterCriteria, PriceRange};
use bazaar_core::presentation::badge_label;
use bazaar_core::{DecorationLevel, Identity, OrderLog, Price, Product, Session, SessionState};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ShellConfig;
use crate::error::Result;
use crate::shell::Storefront;

#[derive(Debug, Clone, Default, Args)]
pub struct BrowseArgs {
    /// Free-text query matched against product name and brand
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Category to search in
    #[arg(short, long, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Only these brands (repeatable)
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Minimum rating thresholds such as "4+" (repeatable)
    #[arg(long = "rating")]
    pub ratings: Vec<String>,

    /// Lowest price to include
    #[arg(long, default_value_t = PriceRange::DEFAULT_MIN)]
    pub min_price: Decimal,

    /// Highest price to include
    #[arg(long, default_value_t = PriceRange::DEFAULT_MAX)]
    pub max_price: Decimal,

    /// Seller types such as "prime" or "third-party" (repeatable)
    #[arg(long = "seller-type")]
    pub seller_types: Vec<String>,

    /// Conditions such as "new" or "refurbished" (repeatable)
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Shipping tags such as "free" or "same-day" (repeatable)
    #[arg(long = "shipping")]
    pub shipping: Vec<String>,
}

impl BrowseArgs {
    /// Sidebar selection described by these arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if `--min-price` is above `--max-price`.
    pub fn criteria(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            price_range: PriceRange::new(self.min_price, self.max_price)?,
            brands: self.brands.iter().cloned().collect(),
            min_rating_thresholds: self.ratings.iter().cloned().collect(),
            seller_types: self.seller_types.iter().cloned().collect(),
            conditions: self.conditions.iter().cloned().collect(),
            shipping_tags: self.shipping.iter().cloned().collect(),
            ..FilterCriteria::default()
        })
    }
}

/// One product as the results grid shows it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductCard<'a> {
    id: &'a str,
    name: &'a str,
    brand: &'a str,
    price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_price: Option<String>,
    discount_percent: u32,
    rating: f64,
    review_count: u32,
    in_stock: bool,
}

impl<'a> From<&'a Product> for ProductCard<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: product.id.as_str(),
            name: &product.name,
            brand: &product.brand,
            price: Price::usd(product.price).display(),
            original_price: product.original_price.map(|p| Price::usd(p).display()),
            discount_percent: product.discount_percent(),
            rating: product.rating,
            review_count: product.review_count,
            in_stock: product.in_stock,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseReport<'a> {
    query: &'a str,
    active_filters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_badge: Option<String>,
    decoration: DecorationLevel,
    count: usize,
    products: Vec<ProductCard<'a>>,
}

/// Run the search and filter requests and print what the grid would show.
///
/// # Errors
///
/// Returns an error if the filters are invalid or output fails.
pub async fn run(config: &ShellConfig, products: Vec<Product>, args: BrowseArgs) -> Result<()> {
    let criteria = args.criteria()?;
    let active_filters = criteria.active_filter_count();

    let state = SessionState::new(products, Identity::default()).with_decoration(config.decoration);
    let shop = Storefront::new(Session::new(state, OrderLog::new()), config);

    let filters = shop.apply_filters(criteria);
    let category = Some(args.category.clone()).filter(|c| !c.trim().is_empty());
    let search = shop.search(args.query.clone(), category);
    tracing::debug!(loading = shop.is_loading(), "Requests started");
    for handle in [filters, search] {
        handle.await.map_err(std::io::Error::other)??;
    }

    let state = shop.snapshot().await;
    let report = BrowseReport {
        query: &args.query,
        active_filters,
        filter_badge: u32::try_from(active_filters).ok().and_then(badge_label),
        decoration: state.decoration(),
        count: state.visible_products().len(),
        products: state.visible_products().iter().map(ProductCard::from).collect(),
    };
    tracing::info!(count = report.count, "Browse complete");
    super::print_json(&report)
}
