//! Subcommand implementations.

pub mod browse;
pub mod checkout;
pub mod seller;

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Write `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
