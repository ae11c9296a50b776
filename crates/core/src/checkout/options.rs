//! Static delivery and payment reference data.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DeliveryOptionId, PaymentMethodId};

/// A shipping speed with a flat price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    pub id: DeliveryOptionId,
    pub display_name: String,
    pub flat_price: Decimal,
    pub eta_label: String,
}

static DELIVERY_OPTIONS: LazyLock<[DeliveryOption; 3]> = LazyLock::new(|| {
    [
        delivery("standard", "Standard Shipping", 599, "5-7 business days"),
        delivery("express", "Express Shipping", 1299, "2-3 business days"),
        delivery("overnight", "Overnight Shipping", 2499, "Next business day"),
    ]
});

fn delivery(id: &str, name: &str, cents: i64, eta: &str) -> DeliveryOption {
    DeliveryOption {
        id: DeliveryOptionId::new(id),
        display_name: name.to_owned(),
        flat_price: Decimal::new(cents, 2),
        eta_label: eta.to_owned(),
    }
}

impl DeliveryOption {
    /// Every offered delivery option, cheapest first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        DELIVERY_OPTIONS.as_slice()
    }

    /// Look up an option by ID.
    #[must_use]
    pub fn find(id: &DeliveryOptionId) -> Option<&'static Self> {
        Self::all().iter().find(|option| &option.id == id)
    }
}

/// A way to pay. Capture happens in the order processor, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub display_name: String,
}

static PAYMENT_METHODS: LazyLock<[PaymentMethod; 3]> = LazyLock::new(|| {
    [
        payment("card", "Credit / Debit Card"),
        payment("paypal", "PayPal"),
        payment("apple", "Apple Pay"),
    ]
});

fn payment(id: &str, name: &str) -> PaymentMethod {
    PaymentMethod {
        id: PaymentMethodId::new(id),
        display_name: name.to_owned(),
    }
}

impl PaymentMethod {
    /// Every accepted payment method.
    #[must_use]
    pub fn all() -> &'static [Self] {
        PAYMENT_METHODS.as_slice()
    }

    /// Look up a method by ID.
    #[must_use]
    pub fn find(id: &PaymentMethodId) -> Option<&'static Self> {
        Self::all().iter().find(|method| &method.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_lookup() {
        let overnight = DeliveryOption::find(&DeliveryOptionId::new("overnight")).unwrap();
        assert_eq!(overnight.flat_price, Decimal::new(2499, 2));
        assert_eq!(overnight.eta_label, "Next business day");
        assert!(DeliveryOption::find(&DeliveryOptionId::new("teleport")).is_none());
    }

    #[test]
    fn test_delivery_prices_are_non_negative_and_ascending() {
        let prices: Vec<_> = DeliveryOption::all().iter().map(|o| o.flat_price).collect();
        assert!(prices.iter().all(|p| !p.is_sign_negative()));
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_payment_lookup() {
        assert_eq!(
            PaymentMethod::find(&PaymentMethodId::new("paypal")).unwrap().display_name,
            "PayPal"
        );
        assert!(PaymentMethod::find(&PaymentMethodId::new("")).is_none());
    }
}
