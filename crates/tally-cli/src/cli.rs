//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Categorize spending and weigh purchase decisions
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Local classification engine for the Tally personal tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine catalog (aliases and built-in categories) to use instead of
    /// the data-dir override or the embedded default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the normalized form of a description
    Normalize {
        /// Text to normalize
        text: String,
    },

    /// Assign a category to a transaction description
    Categorize {
        /// Transaction description
        description: String,

        /// TOML file with [[rules]] and extra [[categories]]
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// List every matching rule and skipped rule
        #[arg(long)]
        explain: bool,
    },

    /// Classify a price against what you paid before
    Price {
        /// Price being considered
        #[arg(allow_negative_numbers = true)]
        price: f64,

        /// Past prices, comma separated (e.g. 4.50,4.75,5)
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        history: Vec<f64>,
    },

    /// Compare an installment plan with paying cash
    Installments {
        /// Amount of each installment
        #[arg(short, long)]
        amount: f64,

        /// Number of monthly installments
        #[arg(short = 'n', long)]
        count: u32,

        /// Expected annual inflation in percent
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        inflation: f64,

        /// Cash price to compare against
        #[arg(short, long)]
        cash: Option<f64>,

        /// Print the per-installment discount table
        #[arg(long)]
        schedule: bool,
    },

    /// Show the effective engine catalog
    Catalog,
}
