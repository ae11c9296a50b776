//! Status enums for seller-side entities.

use serde::{Deserialize, Serialize};

/// Fulfillment status of a seller order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Whether the order still needs seller action.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Publication status of a seller listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Active,
    Draft,
    Archived,
}

/// Inventory health of a listing, derived from its stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Critical,
    Low,
    Good,
}

impl StockLevel {
    /// Stock below this is critical.
    pub const CRITICAL_BELOW: u32 = 5;
    /// Stock below this (and not critical) is low.
    pub const LOW_BELOW: u32 = 10;

    /// Classify a stock count.
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        if stock < Self::CRITICAL_BELOW {
            Self::Critical
        } else if stock < Self::LOW_BELOW {
            Self::Low
        } else {
            Self::Good
        }
    }

    /// Whether the level should raise a restock alert.
    #[must_use]
    pub const fn needs_restock(self) -> bool {
        matches!(self, Self::Critical | Self::Low)
    }
}
