pub mod account;
pub mod alerts;
pub mod completion;
pub mod config;
pub mod products;
pub mod scan;

use anyhow::Result;
use serde_json::Value;

/// Prints a response body as indented JSON on stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
