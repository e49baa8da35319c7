//! Command handlers.
//!
//! Each handler takes the composed `CliContext`, calls the catalog and
//! writes JSON to stdout.

pub mod boundaries;
pub mod load;
pub mod sets;

use anyhow::Result;
use serde::Serialize;

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
