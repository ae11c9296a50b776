//! `bazaar checkout` - replay a scripted shopping session.
//!
//! The script is a YAML list of session actions, for example:
//!
//! ```yaml
//! - action: add_to_cart
//!   product_id: "1"
//!   quantity: 2
//! - action: navigate
//!   view: checkout
//! - action: update_shipping
//!   field: firstName
//!   value: John
//! - action: next_step
//! ```

use std::path::Path;

use bazaar_core::{
    DecorationLevel, Identity, OrderProcessor, OrderSnapshot, Outcome, Product, Session,
    SessionAction, SessionState,
};
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Parse a checkout script.
///
/// # Errors
///
/// Returns an error if the document isn't a list of known actions.
pub fn parse_script(source: &str) -> Result<Vec<SessionAction>> {
    Ok(serde_yaml::from_str(source)?)
}

/// Apply `actions` in order and return the first order placed, if any.
///
/// Ignored actions are logged and skipped; replay keeps going.
///
/// # Errors
///
/// Returns an error if the order processor rejects the order.
pub fn replay<P: OrderProcessor>(
    session: &mut Session<P>,
    actions: Vec<SessionAction>,
) -> Result<Option<OrderSnapshot>> {
    let mut placed = None;
    for (index, action) in actions.into_iter().enumerate() {
        let name = action.name();
        match session.dispatch(action)? {
            Outcome::Applied => {}
            Outcome::Ignored => debug!(index, action = name, "Action had no effect"),
            Outcome::OrderPlaced(snapshot) => {
                info!(index, order_id = %snapshot.order_id, "Order placed");
                placed.get_or_insert(*snapshot);
            }
        }
    }
    Ok(placed)
}

/// Run the script at `path` against a fresh session and print the order.
///
/// # Errors
///
/// Returns an error if the script can't be read, the processor rejects the
/// order, or the script finishes without placing one.
pub fn run<P: OrderProcessor>(
    path: &Path,
    products: Vec<Product>,
    decoration: DecorationLevel,
    processor: P,
) -> Result<()> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let actions = parse_script(&source)?;

    let state = SessionState::new(products, Identity::default()).with_decoration(decoration);
    let mut session = Session::new(state, processor);

    match replay(&mut session, actions)? {
        Some(order) => super::print_json(&order),
        None => Err(CliError::Incomplete(
            session.state().checkout().step().label().to_owned(),
        )),
    }
}
