//! Page-level session state.
//!
//! One [`SessionState`] holds everything the views share: catalog results,
//! cart, filters, identity, and the checkout flow. It changes only through
//! [`SessionState::reduce`], which takes a [`SessionAction`] and reports
//! whether anything happened. [`Session`] pairs the state with the order
//! processor and performs the one side effect: submitting a completed order.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::checkout::{CheckoutFlow, CheckoutStep, ShippingField};
use crate::filter::{FilterCriteria, search_in_category};
use crate::identity::Identity;
use crate::order::{OrderError, OrderProcessor, OrderSnapshot};
use crate::presentation::DecorationLevel;
use crate::totals::OrderSummary;
use crate::types::{DeliveryOptionId, LineId, PaymentMethodId, ProductId};

/// Top-level page being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Browse,
    Checkout,
    Seller,
}

const fn one() -> u32 {
    1
}

/// A discrete user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionAction {
    Navigate {
        view: View,
    },
    Login,
    Logout,
    AddToCart {
        product_id: ProductId,
        #[serde(default = "one")]
        quantity: u32,
    },
    SetQuantity {
        line_id: LineId,
        quantity: u32,
    },
    RemoveLine {
        line_id: LineId,
    },
    ToggleWishlist {
        product_id: ProductId,
    },
    Search {
        query: String,
        #[serde(default)]
        category: Option<String>,
    },
    SetFilters {
        criteria: FilterCriteria,
    },
    ClearFilters,
    UpdateShipping {
        field: ShippingField,
        value: String,
    },
    SelectDelivery {
        id: DeliveryOptionId,
    },
    SelectPayment {
        id: PaymentMethodId,
    },
    SetPromoCode {
        code: String,
    },
    NextStep,
    PreviousStep,
    GoToStep {
        step: CheckoutStep,
    },
    CompleteOrder,
}

impl SessionAction {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::AddToCart { .. } => "add_to_cart",
            Self::SetQuantity { .. } => "set_quantity",
            Self::RemoveLine { .. } => "remove_line",
            Self::ToggleWishlist { .. } => "toggle_wishlist",
            Self::Search { .. } => "search",
            Self::SetFilters { .. } => "set_filters",
            Self::ClearFilters => "clear_filters",
            Self::UpdateShipping { .. } => "update_shipping",
            Self::SelectDelivery { .. } => "select_delivery",
            Self::SelectPayment { .. } => "select_payment",
            Self::SetPromoCode { .. } => "set_promo_code",
            Self::NextStep => "next_step",
            Self::PreviousStep => "previous_step",
            Self::GoToStep { .. } => "go_to_step",
            Self::CompleteOrder => "complete_order",
        }
    }
}

/// Result of reducing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// State changed.
    Applied,
    /// The action was a no-op (unknown ID, failed gate, ...).
    Ignored,
    /// Checkout is complete; the snapshot must be submitted before
    /// [`SessionState::finish_order`] clears the session.
    Submit(Box<OrderSnapshot>),
}

impl From<bool> for Reduction {
    fn from(changed: bool) -> Self {
        if changed { Self::Applied } else { Self::Ignored }
    }
}

/// Everything the storefront views share.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    catalog: Vec<Product>,
    visible: Vec<Product>,
    view: View,
    cart: Cart,
    criteria: FilterCriteria,
    search_query: String,
    search_category: Option<String>,
    identity: Identity,
    checkout: CheckoutFlow,
    decoration: DecorationLevel,
}

impl SessionState {
    /// A browsing session over `catalog` with an empty cart.
    #[must_use]
    pub fn new(catalog: Vec<Product>, identity: Identity) -> Self {
        Self {
            visible: catalog.clone(),
            catalog,
            view: View::default(),
            cart: Cart::new(),
            criteria: FilterCriteria::default(),
            search_query: String::new(),
            search_category: None,
            identity,
            checkout: CheckoutFlow::new(),
            decoration: DecorationLevel::default(),
        }
    }

    /// Start with an existing cart.
    #[must_use]
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.cart = cart;
        self
    }

    #[must_use]
    pub const fn with_decoration(mut self, decoration: DecorationLevel) -> Self {
        self.decoration = decoration;
        self
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub const fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    #[must_use]
    pub const fn decoration(&self) -> DecorationLevel {
        self.decoration
    }

    /// Products currently shown: filtered, then narrowed by the search.
    #[must_use]
    pub fn visible_products(&self) -> &[Product] {
        &self.visible
    }

    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.catalog.iter().filter(|p| p.is_wishlisted).count()
    }

    /// Totals for the current cart and delivery selection.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        self.checkout.summary(&self.cart)
    }

    fn refresh_visible(&mut self) {
        let filtered = self.criteria.apply(&self.catalog);
        self.visible = search_in_category(
            &filtered,
            &self.search_query,
            self.search_category.as_deref(),
        );
    }

    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.catalog.iter().find(|p| &p.id == id)
    }

    /// Apply an action.
    ///
    /// Never fails: anything that can't apply is [`Reduction::Ignored`].
    /// `CompleteOrder` doesn't change state; it returns the snapshot to submit.
    pub fn reduce(&mut self, action: SessionAction) -> Reduction {
        match action {
            SessionAction::Navigate { view } => {
                self.view = view;
                Reduction::Applied
            }
            SessionAction::Login => {
                self.identity.login();
                Reduction::Applied
            }
            SessionAction::Logout => {
                self.identity.logout();
                Reduction::Applied
            }
            SessionAction::AddToCart {
                product_id,
                quantity,
            } => match self.product(&product_id).cloned() {
                Some(product) => self.cart.add_product(&product, quantity).into(),
                None => Reduction::Ignored,
            },
            // Quantity steppers bottom out at one; removal is a separate action.
            SessionAction::SetQuantity { line_id, quantity } => {
                self.cart.set_quantity(&line_id, quantity.max(1)).into()
            }
            SessionAction::RemoveLine { line_id } => self.cart.remove(&line_id).into(),
            SessionAction::ToggleWishlist { product_id } => {
                let Some(product) = self.catalog.iter_mut().find(|p| p.id == product_id) else {
                    return Reduction::Ignored;
                };
                let before = product.is_wishlisted;
                let changed = product.toggle_wishlist() != before;
                self.refresh_visible();
                changed.into()
            }
            SessionAction::Search { query, category } => {
                self.search_query = query;
                self.search_category = category;
                self.refresh_visible();
                Reduction::Applied
            }
            SessionAction::SetFilters { criteria } => {
                self.criteria = criteria;
                self.refresh_visible();
                Reduction::Applied
            }
            SessionAction::ClearFilters => {
                self.criteria.clear();
                self.refresh_visible();
                Reduction::Applied
            }
            SessionAction::UpdateShipping { field, value } => {
                self.checkout.update_field(field, value);
                Reduction::Applied
            }
            SessionAction::SelectDelivery { id } => self.checkout.select_delivery(&id).into(),
            SessionAction::SelectPayment { id } => self.checkout.select_payment(&id).into(),
            SessionAction::SetPromoCode { code } => {
                self.checkout.set_promo_code(code);
                Reduction::Applied
            }
            SessionAction::NextStep => self.checkout.advance().into(),
            SessionAction::PreviousStep => self.checkout.retreat().into(),
            SessionAction::GoToStep { step } => self.checkout.jump_to(step).into(),
            SessionAction::CompleteOrder => self
                .checkout
                .snapshot(&self.cart)
                .map_or(Reduction::Ignored, |snapshot| {
                    Reduction::Submit(Box::new(snapshot))
                }),
        }
    }

    /// Clear the session after the order processor accepted an order.
    pub fn finish_order(&mut self) {
        self.cart.clear();
        self.checkout.reset();
        self.view = View::Browse;
    }
}

/// What [`Session::dispatch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
    /// The processor accepted the order and the session was reset.
    OrderPlaced(Box<OrderSnapshot>),
}

/// Single owner of the session state.
#[derive(Debug)]
pub struct Session<P> {
    state: SessionState,
    processor: P,
}

impl<P: OrderProcessor> Session<P> {
    #[must_use]
    pub const fn new(state: SessionState, processor: P) -> Self {
        Self { state, processor }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn processor(&self) -> &P {
        &self.processor
    }

    /// Apply an action, submitting the order when checkout completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the order processor rejects a completed order. The
    /// cart and checkout are left untouched so the order can be retried.
    #[instrument(skip_all, fields(action = action.name()))]
    pub fn dispatch(&mut self, action: SessionAction) -> Result<Outcome, OrderError> {
        match self.state.reduce(action) {
            Reduction::Applied => Ok(Outcome::Applied),
            Reduction::Ignored => Ok(Outcome::Ignored),
            Reduction::Submit(snapshot) => {
                if let Err(e) = self.processor.submit(&snapshot) {
                    warn!(order_id = %snapshot.order_id, error = %e, "Order submission failed");
                    return Err(e);
                }
                info!(
                    order_id = %snapshot.order_id,
                    lines = snapshot.cart_lines.len(),
                    total = %snapshot.totals.total,
                    "Order placed"
                );
                self.state.finish_order();
                Ok(Outcome::OrderPlaced(snapshot))
            }
        }
    }

    /// Give up the session, returning its parts.
    pub fn into_parts(self) -> (SessionState, P) {
        (self.state, self.processor)
    }
}
