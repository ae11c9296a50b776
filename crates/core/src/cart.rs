//! Shopping cart owned by the session.
//!
//! Mutations on unknown line IDs are silent no-ops; they report `false` so the
//! caller can log the miss, but nothing is raised. Quantities are not
//! floored here: the interface clamps to 1 before calling
//! [`Cart::set_quantity`], and stock is the catalog's concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;
use crate::types::LineId;

/// One entry in the cart: a product reference plus quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: LineId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_label: Option<String>,
}

impl CartLine {
    /// `unit_price × quantity`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// The session's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Create a cart holding `lines` in order.
    #[must_use]
    pub const fn with_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by ID.
    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Total number of units across all lines (the cart badge count).
    ///
    /// Saturates at `u32::MAX`, like the per-line merge in
    /// [`Cart::add_product`].
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count: u32, line| count.saturating_add(line.quantity))
    }

    /// Replace a line's quantity. Returns whether a line was updated.
    pub fn set_quantity(&mut self, id: &LineId, quantity: u32) -> bool {
        match self.lines.iter_mut().find(|line| &line.id == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => {
                debug!(line_id = %id, "set_quantity on unknown cart line ignored");
                false
            }
        }
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove(&mut self, id: &LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        let removed = self.lines.len() != before;
        if !removed {
            debug!(line_id = %id, "remove on unknown cart line ignored");
        }
        removed
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into the existing line for the same product. Out-of-stock
    /// products and a zero quantity are ignored. Returns whether the cart
    /// changed.
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> bool {
        if !product.in_stock || quantity == 0 {
            debug!(product_id = %product.id, "add_product ignored");
            return false;
        }

        let id = LineId::new(product.id.as_str());
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
                image_ref: product.image_ref.clone(),
                variant_label: None,
            });
        }
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
