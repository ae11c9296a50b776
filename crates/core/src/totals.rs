//! Order totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::checkout::DeliveryOption;
use crate::types::Price;

/// Flat tax multiplier applied to the subtotal (8%).
///
/// Not jurisdiction-aware.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Derived order amounts. `total == subtotal + shipping_cost + tax` unless a
/// sum saturates at [`Decimal::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Total as a displayable USD price.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::usd(self.total)
    }
}

/// Compute subtotal, shipping, tax, and total for `lines`.
///
/// Shipping is the selected option's flat price, or zero when nothing is
/// selected. Arithmetic is exact; nothing is rounded. Sums saturate at
/// [`Decimal::MAX`] rather than panic.
#[must_use]
pub fn compute_totals(lines: &[CartLine], delivery: Option<&DeliveryOption>) -> OrderSummary {
    let subtotal = lines
        .iter()
        .map(CartLine::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let shipping_cost = delivery.map_or(Decimal::ZERO, |option| option.flat_price);
    let tax = subtotal.saturating_mul(TAX_RATE);

    OrderSummary {
        subtotal,
        shipping_cost,
        tax,
        total: subtotal.saturating_add(shipping_cost).saturating_add(tax),
    }
}
