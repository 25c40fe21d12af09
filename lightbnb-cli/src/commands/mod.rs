//! Command implementations for the lightbnb CLI
//!
//! Each command runs against a `&dyn Store` and returns its result as JSON;
//! `main` prints it. Lookups that find nothing yield `null`.

pub mod db;
pub mod properties;
pub mod reservations;
pub mod users;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

pub use db::run_db;
pub use properties::run_properties;
pub use reservations::run_reservations;
pub use users::run_users;

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("Failed to serialize result")
}

/// Pretty-print a command result on stdout.
pub fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
