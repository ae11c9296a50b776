//! Bazaar CLI - drive the storefront session from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Search and filter the catalog
//! bazaar browse --query wireless --shipping free --max-price 100
//!
//! # Replay a scripted checkout and print the placed order
//! bazaar checkout order.yaml
//!
//! # Seller dashboard, optionally searching orders
//! bazaar seller --search sarah
//! ```
//!
//! # Commands
//!
//! - `browse` - Filter and search products (with simulated result latency)
//! - `checkout` - Replay session actions through the four-step checkout
//! - `seller` - Print dashboard metrics, listings, and orders
//!
//! Configuration comes from the environment; see [`config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bazaar_core::OrderLog;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod commands;
mod config;
mod error;
mod shell;

use commands::browse::BrowseArgs;
use config::{LogFormat, ShellConfig};
use error::Result;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar storefront shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and filter the product catalog
    Browse(BrowseArgs),
    /// Replay a YAML script of session actions through checkout
    Checkout {
        /// Path to the script
        script: PathBuf,
    },
    /// Show the seller dashboard
    Seller {
        /// Only orders whose id, customer, or email contains this
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ShellConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_cli=info,bazaar_core=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so stdout stays clean JSON
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

async fn run(cli: Cli, config: ShellConfig) -> Result<()> {
    let products = catalog::load(config.catalog_path.as_deref())?;
    tracing::debug!(
        products = products.len(),
        decoration = %config.decoration,
        "Catalog ready"
    );

    match cli.command {
        Commands::Browse(args) => commands::browse::run(&config, products, args).await?,
        Commands::Checkout { script } => {
            commands::checkout::run(&script, products, config.decoration, OrderLog::new())?;
        }
        Commands::Seller { search } => commands::seller::run(search.as_deref())?,
    }
    Ok(())
}
