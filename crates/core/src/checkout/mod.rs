//! Four-step checkout flow.
//!
//! The flow is linear: `Shipping → Delivery → Payment → Review`. Moving
//! forward requires the current step's gate to hold; moving back is always
//! allowed, to any earlier step, and keeps everything entered so far.
//! Navigation that isn't allowed is a no-op reported as `false`.

mod options;
mod shipping;
mod step;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

pub use options::{DeliveryOption, PaymentMethod};
pub use shipping::{ShippingField, ShippingInfo};
pub use step::{CheckoutStep, StepStatus};

use crate::cart::Cart;
use crate::order::OrderSnapshot;
use crate::totals::{OrderSummary, compute_totals};
use crate::types::{DeliveryOptionId, OrderId, PaymentMethodId};
use crate::validation::{FieldValidation, ValidationState};

/// Checkout controller state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping: ShippingInfo,
    validation: ValidationState,
    delivery: Option<DeliveryOptionId>,
    payment: Option<PaymentMethodId>,
    promo_code: String,
}

impl CheckoutFlow {
    /// A fresh flow at the shipping step with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    #[must_use]
    pub const fn validation(&self) -> &ValidationState {
        &self.validation
    }

    #[must_use]
    pub fn promo_code(&self) -> &str {
        &self.promo_code
    }

    /// The selected delivery option, if any.
    #[must_use]
    pub fn delivery_option(&self) -> Option<&'static DeliveryOption> {
        self.delivery.as_ref().and_then(DeliveryOption::find)
    }

    /// The selected payment method, if any.
    #[must_use]
    pub fn payment_method(&self) -> Option<&'static PaymentMethod> {
        self.payment.as_ref().and_then(PaymentMethod::find)
    }

    /// Eta label of the selected delivery option.
    #[must_use]
    pub fn estimated_delivery(&self) -> Option<&'static str> {
        self.delivery_option().map(|option| option.eta_label.as_str())
    }

    /// Store a shipping field and re-validate it.
    pub fn update_field(&mut self, field: ShippingField, value: impl Into<String>) -> FieldValidation {
        let value = value.into();
        let outcome = self.validation.record(field.name(), &value);
        self.shipping.set(field, value);
        outcome
    }

    /// Select a delivery option. Unknown IDs are ignored.
    pub fn select_delivery(&mut self, id: &DeliveryOptionId) -> bool {
        if DeliveryOption::find(id).is_none() {
            debug!(delivery = %id, "unknown delivery option ignored");
            return false;
        }
        self.delivery = Some(id.clone());
        true
    }

    /// Select a payment method. Unknown IDs are ignored.
    pub fn select_payment(&mut self, id: &PaymentMethodId) -> bool {
        if PaymentMethod::find(id).is_none() {
            debug!(payment = %id, "unknown payment method ignored");
            return false;
        }
        self.payment = Some(id.clone());
        true
    }

    /// Store a promo code. Codes are kept for the order but never priced.
    pub fn set_promo_code(&mut self, code: impl Into<String>) {
        self.promo_code = code.into();
    }

    /// Whether the current step's gate holds.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.step {
            CheckoutStep::Shipping => self
                .validation
                .all_valid(&ShippingField::required_names()),
            CheckoutStep::Delivery => self.delivery_option().is_some(),
            CheckoutStep::Payment => self.payment_method().is_some(),
            CheckoutStep::Review => true,
        }
    }

    /// Move to the next step if the gate holds.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            debug!(step = %self.step, "advance blocked by step gate");
            return false;
        }
        let Some(next) = self.step.next() else {
            return false;
        };
        info!(from = %self.step, to = %next, "checkout advanced");
        self.step = next;
        true
    }

    /// Move back one step.
    pub fn retreat(&mut self) -> bool {
        let Some(previous) = self.step.previous() else {
            return false;
        };
        self.step = previous;
        true
    }

    /// Jump to `target` if it isn't past the current step.
    pub fn jump_to(&mut self, target: CheckoutStep) -> bool {
        if target > self.step {
            debug!(step = %self.step, target = %target, "forward jump refused");
            return false;
        }
        self.step = target;
        true
    }

    /// Progress indicator status for `step`.
    #[must_use]
    pub fn status_of(&self, step: CheckoutStep) -> StepStatus {
        StepStatus::of(step, self.step)
    }

    /// Progress bar fill, `step / 4 × 100`.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.step.number() * 25
    }

    /// Totals for `cart` with the selected delivery option.
    #[must_use]
    pub fn summary(&self, cart: &Cart) -> OrderSummary {
        compute_totals(cart.lines(), self.delivery_option())
    }

    /// Freeze the order for submission.
    ///
    /// Only available at the review step, where delivery and payment are
    /// guaranteed to have been selected.
    #[must_use]
    pub fn snapshot(&self, cart: &Cart) -> Option<OrderSnapshot> {
        if self.step != CheckoutStep::Review {
            return None;
        }
        let delivery_option = self.delivery_option()?;
        let payment_method = self.payment_method()?;

        Some(OrderSnapshot {
            order_id: OrderId::generate(),
            placed_at: Utc::now(),
            shipping_info: self.shipping.clone(),
            delivery_option: delivery_option.clone(),
            payment_method: payment_method.clone(),
            cart_lines: cart.lines().to_vec(),
            totals: self.summary(cart),
            promo_code: self.promo_code.clone(),
        })
    }

    /// Return to a fresh flow.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::CartLine;
    use crate::types::LineId;

    fn fill_shipping(flow: &mut CheckoutFlow) {
        flow.update_field(ShippingField::FirstName, "John");
        flow.update_field(ShippingField::LastName, "Doe");
        flow.update_field(ShippingField::Email, "john.doe@example.com");
        flow.update_field(ShippingField::Phone, "(555) 123-4567");
        flow.update_field(ShippingField::Address, "123 Main Street");
        flow.update_field(ShippingField::City, "New York");
        flow.update_field(ShippingField::State, "NY");
        flow.update_field(ShippingField::ZipCode, "10001");
    }

    fn at_review() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new();
        fill_shipping(&mut flow);
        assert!(flow.advance());
        assert!(flow.select_delivery(&DeliveryOptionId::new("express")));
        assert!(flow.advance());
        assert!(flow.select_payment(&PaymentMethodId::new("card")));
        assert!(flow.advance());
        assert_eq!(flow.step(), CheckoutStep::Review);
        flow
    }

    fn cart() -> Cart {
        Cart::with_lines(vec![CartLine {
            id: LineId::new("1"),
            name: "Wireless Bluetooth Headphones".to_owned(),
            unit_price: Decimal::new(8999, 2),
            quantity: 2,
            image_ref: String::new(),
            variant_label: Some("Black".to_owned()),
        }])
    }

    #[test]
    fn test_starts_at_shipping() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert_eq!(flow.shipping().country, "US");
        assert_eq!(flow.progress_percent(), 25);
    }

    #[test]
    fn test_advance_blocked_until_shipping_valid() {
        let mut flow = CheckoutFlow::new();
        assert!(!flow.can_advance());
        assert!(!flow.advance());
        assert_eq!(flow.step(), CheckoutStep::Shipping);

        fill_shipping(&mut flow);
        assert!(flow.can_advance());
        assert!(flow.advance());
        assert_eq!(flow.step(), CheckoutStep::Delivery);
    }

    #[test]
    fn test_one_invalid_field_blocks_shipping() {
        let mut flow = CheckoutFlow::new();
        fill_shipping(&mut flow);
        flow.update_field(ShippingField::ZipCode, "abc");
        assert!(!flow.advance());
        assert_eq!(
            flow.validation().error("zipCode"),
            Some(crate::validation::ZIP_CODE_MESSAGE)
        );
    }

    #[test]
    fn test_country_is_not_required() {
        let mut flow = CheckoutFlow::new();
        fill_shipping(&mut flow);
        flow.update_field(ShippingField::Country, "");
        assert!(flow.can_advance());
    }

    #[test]
    fn test_delivery_and_payment_gates() {
        let mut flow = CheckoutFlow::new();
        fill_shipping(&mut flow);
        flow.advance();

        assert!(!flow.advance());
        assert!(!flow.select_delivery(&DeliveryOptionId::new("teleport")));
        assert!(!flow.advance());
        assert!(flow.select_delivery(&DeliveryOptionId::new("standard")));
        assert!(flow.advance());
        assert_eq!(flow.step(), CheckoutStep::Payment);

        assert!(!flow.advance());
        assert!(flow.select_payment(&PaymentMethodId::new("paypal")));
        assert!(flow.advance());
        assert_eq!(flow.step(), CheckoutStep::Review);
        assert!(flow.can_advance());
        assert!(!flow.advance());
        assert_eq!(flow.progress_percent(), 100);
    }

    #[test]
    fn test_retreat_is_unguarded() {
        let mut flow = at_review();
        assert!(flow.retreat());
        assert_eq!(flow.step(), CheckoutStep::Payment);

        let mut fresh = CheckoutFlow::new();
        assert!(!fresh.retreat());
        assert_eq!(fresh.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_edit_shipping_from_review_keeps_selections() {
        let mut flow = at_review();
        assert!(flow.jump_to(CheckoutStep::Shipping));
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert_eq!(flow.delivery_option().unwrap().id.as_str(), "express");
        assert_eq!(flow.payment_method().unwrap().id.as_str(), "card");
        assert_eq!(flow.shipping().first_name, "John");

        // the gates still hold, so the shopper can walk straight back
        assert!(flow.advance());
        assert!(flow.advance());
        assert!(flow.advance());
        assert_eq!(flow.step(), CheckoutStep::Review);
    }

    #[test]
    fn test_forward_jump_refused() {
        let mut flow = CheckoutFlow::new();
        fill_shipping(&mut flow);
        assert!(!flow.jump_to(CheckoutStep::Review));
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert!(flow.jump_to(CheckoutStep::Shipping));
    }

    #[test]
    fn test_step_statuses() {
        let mut flow = at_review();
        flow.jump_to(CheckoutStep::Delivery);
        assert_eq!(flow.status_of(CheckoutStep::Shipping), StepStatus::Complete);
        assert_eq!(flow.status_of(CheckoutStep::Delivery), StepStatus::Current);
        assert_eq!(flow.status_of(CheckoutStep::Review), StepStatus::Upcoming);
        assert_eq!(flow.progress_percent(), 50);
    }

    #[test]
    fn test_summary_uses_selected_delivery() {
        let mut flow = CheckoutFlow::new();
        let cart = cart();
        assert_eq!(flow.summary(&cart).shipping_cost, Decimal::ZERO);

        flow.select_delivery(&DeliveryOptionId::new("overnight"));
        assert_eq!(flow.summary(&cart).shipping_cost, Decimal::new(2499, 2));
        assert_eq!(flow.estimated_delivery(), Some("Next business day"));
    }

    #[test]
    fn test_snapshot_only_at_review() {
        let mut flow = CheckoutFlow::new();
        fill_shipping(&mut flow);
        assert!(flow.snapshot(&cart()).is_none());

        let flow = at_review();
        let snapshot = flow.snapshot(&cart()).unwrap();
        assert_eq!(snapshot.shipping_info.email, "john.doe@example.com");
        assert_eq!(snapshot.delivery_option.id.as_str(), "express");
        assert_eq!(snapshot.payment_method.id.as_str(), "card");
        assert_eq!(snapshot.cart_lines.len(), 1);
        assert_eq!(
            snapshot.totals.total,
            snapshot.totals.subtotal + snapshot.totals.shipping_cost + snapshot.totals.tax
        );
    }

    #[test]
    fn test_snapshot_carries_promo_code() {
        let mut flow = at_review();
        assert_eq!(flow.snapshot(&cart()).unwrap().promo_code, "");

        flow.set_promo_code("SAVE10");
        let snapshot = flow.snapshot(&cart()).unwrap();
        assert_eq!(snapshot.promo_code, "SAVE10");
        assert_eq!(snapshot.totals, flow.summary(&cart()));
    }

    #[test]
    fn test_reset() {
        let mut flow = at_review();
        flow.set_promo_code("SAVE10");
        flow.reset();
        assert_eq!(flow, CheckoutFlow::new());
        assert_eq!(flow.promo_code(), "");
    }
}
