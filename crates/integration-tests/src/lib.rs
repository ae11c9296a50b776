//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Full shopping sessions driven through [`Session`]
//! - `filtering` - Filter evaluator and search over the sample catalog
//! - `totals` - Totals arithmetic and display rounding
//!
//! This crate only holds fixtures shared by the test files.

use bazaar_core::{
    DeliveryOptionId, Identity, OrderLog, OrderProcessor, PaymentMethodId, ProductId,
    SampleCatalog, Session, SessionAction, SessionState, ShippingField, View,
};

/// A complete, valid shipping address.
pub const SHIPPING: [(ShippingField, &str); 8] = [
    (ShippingField::FirstName, "John"),
    (ShippingField::LastName, "Doe"),
    (ShippingField::Email, "john.doe@example.com"),
    (ShippingField::Phone, "+1 (555) 123-4567"),
    (ShippingField::Address, "123 Main Street"),
    (ShippingField::City, "New York"),
    (ShippingField::State, "NY"),
    (ShippingField::ZipCode, "10001-1234"),
];

/// A guest session over the sample catalog.
#[must_use]
pub fn sample_state() -> SessionState {
    SessionState::new(SampleCatalog::sample_products(), Identity::guest("John Doe"))
}

/// A session over the sample catalog that records placed orders.
#[must_use]
pub fn sample_session() -> Session<OrderLog> {
    Session::new(sample_state(), OrderLog::new())
}

#[must_use]
pub fn add(product_id: &str, quantity: u32) -> SessionAction {
    SessionAction::AddToCart {
        product_id: ProductId::new(product_id),
        quantity,
    }
}

/// Actions filling in every shipping field.
pub fn shipping_actions() -> impl Iterator<Item = SessionAction> {
    SHIPPING
        .into_iter()
        .map(|(field, value)| SessionAction::UpdateShipping {
            field,
            value: value.to_owned(),
        })
}

/// Actions taking a fresh checkout from Shipping to Review.
#[must_use]
pub fn checkout_to_review(delivery: &str, payment: &str) -> Vec<SessionAction> {
    let mut actions = vec![SessionAction::Navigate {
        view: View::Checkout,
    }];
    actions.extend(shipping_actions());
    actions.extend([
        SessionAction::NextStep,
        SessionAction::SelectDelivery {
            id: DeliveryOptionId::new(delivery),
        },
        SessionAction::NextStep,
        SessionAction::SelectPayment {
            id: PaymentMethodId::new(payment),
        },
        SessionAction::NextStep,
    ]);
    actions
}

/// Dispatch every action, panicking on processor errors.
///
/// # Panics
///
/// Panics if the processor rejects an order.
pub fn run_all<P: OrderProcessor>(session: &mut Session<P>, actions: impl IntoIterator<Item = SessionAction>) {
    for action in actions {
        if let Err(e) = session.dispatch(action) {
            panic!("dispatch failed: {e}");
        }
    }
}
