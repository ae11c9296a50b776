//! `bazaar seller` - print the seller dashboard.

use bazaar_core::seller::{DashboardMetrics, SellerDashboard, SellerOrder};
use bazaar_core::{Price, StockLevel};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingRow<'a> {
    id: &'a str,
    name: &'a str,
    stock: u32,
    stock_level: StockLevel,
    price: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardReport<'a> {
    metrics: DashboardMetrics,
    total_revenue: String,
    listings: Vec<ListingRow<'a>>,
    orders: Vec<&'a SellerOrder>,
}

fn report<'a>(dashboard: &'a SellerDashboard, search: Option<&str>) -> DashboardReport<'a> {
    let metrics = dashboard.metrics();
    DashboardReport {
        metrics,
        total_revenue: Price::usd(metrics.total_revenue).display(),
        listings: dashboard
            .listings
            .iter()
            .map(|listing| ListingRow {
                id: listing.id.as_str(),
                name: &listing.name,
                stock: listing.stock,
                stock_level: listing.stock_level(),
                price: Price::usd(listing.price).display(),
            })
            .collect(),
        orders: dashboard.search_orders(search.unwrap_or_default()),
    }
}

/// Print metrics, listings, and (optionally searched) orders.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run(search: Option<&str>) -> Result<()> {
    let dashboard = SellerDashboard::sample();
    super::print_json(&report(&dashboard, search))
}
