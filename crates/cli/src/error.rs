//! Errors surfaced by the `bazaar` commands.

use std::path::PathBuf;

use bazaar_core::filter::FilterError;
use bazaar_core::{CatalogError, OrderError};
use thiserror::Error;

use crate::config::ConfigError;

/// Top-level CLI error.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid checkout script: {0}")]
    Script(#[from] serde_yaml::Error),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The script ran to completion without placing an order.
    #[error("Checkout did not complete (stopped at step: {0})")]
    Incomplete(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
