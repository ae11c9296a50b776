//! Bazaar Core - storefront session logic.
//!
//! This crate holds everything the storefront views compute, independent of
//! how they are rendered:
//! - checkout step flow with per-step gates
//! - order totals with a flat tax rate
//! - form field validation
//! - cart mutation
//! - product filtering and search
//! - the seller dashboard's derived metrics
//!
//! # Architecture
//!
//! The core contains only types, pure functions, and in-memory state - no
//! I/O and no async. Collaborators (catalog, order processing, identity) sit
//! behind traits or plain data so a shell can drive the session however it
//! likes.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`validation`] - Field validator and per-form validation state
//! - [`totals`] - Order totals calculator
//! - [`cart`] - Cart lines and mutations
//! - [`checkout`] - Four-step checkout controller
//! - [`filter`] - Filter criteria and free-text search
//! - [`catalog`] - Product model, catalog provider, sidebar facets
//! - [`order`] - Order snapshot and processor boundary
//! - [`session`] - Session state and action reducer
//! - [`seller`] - Seller dashboard data
//! - [`identity`] - Shopper identity
//! - [`presentation`] - Decoration level and badge formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod filter;
pub mod identity;
pub mod order;
pub mod presentation;
pub mod seller;
pub mod session;
pub mod totals;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartLine};
pub use catalog::{CatalogError, CatalogProvider, Product, SampleCatalog};
pub use checkout::{CheckoutFlow, CheckoutStep, DeliveryOption, PaymentMethod, ShippingField, ShippingInfo};
pub use filter::{FilterCriteria, PriceRange};
pub use identity::Identity;
pub use order::{OrderError, OrderLog, OrderProcessor, OrderSnapshot};
pub use presentation::DecorationLevel;
pub use session::{Outcome, Session, SessionAction, SessionState, View};
pub use totals::{OrderSummary, compute_totals};
pub use types::*;
pub use validation::{FieldValidation, validate};
