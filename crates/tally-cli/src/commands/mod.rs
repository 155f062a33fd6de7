//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Catalog and rule file loading, `normalize`, `catalog`
//! - `categorize` - Category assignment and rule inspection
//! - `decisions` - Price classification and installment comparison

pub mod categorize;
pub mod core;
pub mod decisions;

// Re-export command functions for main.rs
pub use categorize::*;
pub use core::*;
pub use decisions::*;

use anyhow::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
