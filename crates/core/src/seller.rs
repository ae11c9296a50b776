//! Seller dashboard: listings, orders, and headline metrics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ListingId, ListingStatus, OrderStatus, SellerOrderId, StockLevel};

/// Sections of the seller dashboard sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    #[default]
    Dashboard,
    Products,
    Orders,
    Analytics,
    Settings,
    Help,
}

impl DashboardSection {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Products,
        Self::Orders,
        Self::Analytics,
        Self::Settings,
        Self::Help,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard Overview",
            Self::Products => "Product Management",
            Self::Orders => "Order Management",
            Self::Analytics => "Analytics & Reports",
            Self::Settings => "Account Settings",
            Self::Help => "Help & Support",
        }
    }
}

/// A product the seller has listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerListing {
    pub id: ListingId,
    pub name: String,
    pub image_ref: String,
    pub stock: u32,
    pub price: Decimal,
    pub status: ListingStatus,
}

impl SellerListing {
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }
}

/// An order placed with the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerOrder {
    pub id: SellerOrderId,
    pub customer: String,
    pub email: String,
    pub products: String,
    pub amount: Decimal,
    pub status: OrderStatus,
    pub date: NaiveDate,
}

/// Headline numbers for the dashboard overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: Decimal,
    pub active_listings: usize,
    pub open_orders: usize,
    pub restock_alerts: usize,
}

/// Seller-side data set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerDashboard {
    pub listings: Vec<SellerListing>,
    pub orders: Vec<SellerOrder>,
}

impl SellerDashboard {
    /// Demonstration listings and orders.
    #[must_use]
    pub fn sample() -> Self {
        let listing = |id: &str, name: &str, stock: u32, cents: i64| SellerListing {
            id: ListingId::new(id),
            name: name.to_owned(),
            image_ref: "/api/placeholder/50/50".to_owned(),
            stock,
            price: Decimal::new(cents, 2),
            status: ListingStatus::Active,
        };
        let order = |id: &str,
                     customer: &str,
                     email: &str,
                     products: &str,
                     cents: i64,
                     status: OrderStatus,
                     day: u32| SellerOrder {
            id: SellerOrderId::new(id),
            customer: customer.to_owned(),
            email: email.to_owned(),
            products: products.to_owned(),
            amount: Decimal::new(cents, 2),
            status,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default(),
        };

        Self {
            listings: vec![
                listing("P001", "Wireless Headphones", 25, 8999),
                listing("P002", "Smart Watch Pro", 8, 29999),
                listing("P003", "Phone Case", 2, 2499),
                listing("P004", "Bluetooth Speaker", 45, 7999),
            ],
            orders: vec![
                order(
                    "#12847",
                    "John Smith",
                    "john@example.com",
                    "Wireless Headphones",
                    8999,
                    OrderStatus::Processing,
                    15,
                ),
                order(
                    "#12846",
                    "Sarah Johnson",
                    "sarah@example.com",
                    "Smart Watch",
                    29999,
                    OrderStatus::Shipped,
                    15,
                ),
                order(
                    "#12845",
                    "Mike Davis",
                    "mike@example.com",
                    "Phone Case",
                    2499,
                    OrderStatus::Delivered,
                    14,
                ),
                order(
                    "#12844",
                    "Emily Brown",
                    "emily@example.com",
                    "Bluetooth Speaker",
                    7999,
                    OrderStatus::Pending,
                    14,
                ),
            ],
        }
    }

    #[must_use]
    pub fn metrics(&self) -> DashboardMetrics {
        DashboardMetrics {
            total_revenue: self.orders.iter().map(|order| order.amount).sum(),
            active_listings: self
                .listings
                .iter()
                .filter(|listing| listing.status == ListingStatus::Active)
                .count(),
            open_orders: self.orders.iter().filter(|order| order.status.is_open()).count(),
            restock_alerts: self.restock_alerts().count(),
        }
    }

    /// Listings whose stock is low or critical.
    pub fn restock_alerts(&self) -> impl Iterator<Item = &SellerListing> {
        self.listings
            .iter()
            .filter(|listing| listing.stock_level().needs_restock())
    }

    /// Orders whose id, customer, or email contains `query` (case-insensitive).
    #[must_use]
    pub fn search_orders(&self, query: &str) -> Vec<&SellerOrder> {
        let needle = query.trim().to_lowercase();
        self.orders
            .iter()
            .filter(|order| {
                needle.is_empty()
                    || order.id.as_str().to_lowercase().contains(&needle)
                    || order.customer.to_lowercase().contains(&needle)
                    || order.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Orders in a given status, in listing order.
    #[must_use]
    pub fn orders_with_status(&self, status: OrderStatus) -> Vec<&SellerOrder> {
        self.orders.iter().filter(|order| order.status == status).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_metrics() {
        let metrics = SellerDashboard::sample().metrics();
        assert_eq!(metrics.total_revenue, Decimal::new(49496, 2));
        assert_eq!(metrics.active_listings, 4);
        assert_eq!(metrics.open_orders, 2);
        assert_eq!(metrics.restock_alerts, 2);
    }

    #[test]
    fn test_restock_alerts() {
        let dashboard = SellerDashboard::sample();
        let alerts: Vec<_> = dashboard
            .restock_alerts()
            .map(|listing| (listing.id.as_str(), listing.stock_level()))
            .collect();
        assert_eq!(
            alerts,
            vec![("P002", StockLevel::Low), ("P003", StockLevel::Critical)]
        );
    }

    #[test]
    fn test_search_orders() {
        let dashboard = SellerDashboard::sample();
        let ids = |orders: Vec<&SellerOrder>| -> Vec<String> {
            orders.iter().map(|order| order.id.to_string()).collect()
        };

        assert_eq!(ids(dashboard.search_orders("SARAH")), vec!["#12846"]);
        assert_eq!(ids(dashboard.search_orders("#1284")).len(), 4);
        assert_eq!(ids(dashboard.search_orders("mike@")), vec!["#12845"]);
        assert!(dashboard.search_orders("nobody").is_empty());
    }

    #[test]
    fn test_orders_with_status() {
        let dashboard = SellerDashboard::sample();
        let pending = dashboard.orders_with_status(OrderStatus::Pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].customer, "Emily Brown");
    }

    #[test]
    fn test_archived_listing_not_active() {
        let mut dashboard = SellerDashboard::sample();
        dashboard.listings[0].status = ListingStatus::Archived;
        assert_eq!(dashboard.metrics().active_listings, 3);
    }

    #[test]
    fn test_section_labels() {
        assert_eq!(DashboardSection::ALL.len(), 6);
        assert_eq!(DashboardSection::Orders.label(), "Order Management");
    }
}
