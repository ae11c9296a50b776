//! Completed-order snapshot and the order-processing boundary.
//!
//! Bazaar does not capture payment or persist orders. When checkout
//! completes, the snapshot is handed to an [`OrderProcessor`]; if the
//! processor rejects it, the session keeps the cart and checkout state so the
//! shopper can retry.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLine;
use crate::checkout::{DeliveryOption, PaymentMethod, ShippingInfo};
use crate::totals::OrderSummary;
use crate::types::OrderId;

/// Errors from the order-processing collaborator.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The processor refused the order.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// The processor could not be reached or failed internally.
    #[error("Order processor unavailable: {0}")]
    Unavailable(String),
}

/// Everything the order processor needs, frozen at completion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub shipping_info: ShippingInfo,
    pub delivery_option: DeliveryOption,
    pub payment_method: PaymentMethod,
    pub cart_lines: Vec<CartLine>,
    pub totals: OrderSummary,
    /// Code entered at review. Recorded only; it never changes the totals.
    #[serde(default)]
    pub promo_code: String,
}

/// Receives completed orders.
pub trait OrderProcessor {
    /// Accept an order for payment capture and fulfillment.
    ///
    /// # Errors
    ///
    /// Returns an error if the order can't be accepted; the caller keeps its
    /// state unchanged in that case.
    fn submit(&self, order: &OrderSnapshot) -> Result<(), OrderError>;
}

impl<P: OrderProcessor + ?Sized> OrderProcessor for &P {
    fn submit(&self, order: &OrderSnapshot) -> Result<(), OrderError> {
        (**self).submit(order)
    }
}

/// In-memory processor that keeps every submitted order.
#[derive(Debug, Default)]
pub struct OrderLog {
    orders: Mutex<Vec<OrderSnapshot>>,
}

impl OrderLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders submitted so far, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<OrderSnapshot> {
        self.orders
            .lock()
            .map(|orders| orders.clone())
            .unwrap_or_default()
    }
}

impl OrderProcessor for OrderLog {
    fn submit(&self, order: &OrderSnapshot) -> Result<(), OrderError> {
        self.orders
            .lock()
            .map_err(|_| OrderError::Unavailable("Lock poisoned".to_string()))?
            .push(order.clone());
        tracing::info!(order_id = %order.order_id, total = %order.totals.total, "Order recorded");
        Ok(())
    }
}
