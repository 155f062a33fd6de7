//! Tally CLI - Local classification engine
//!
//! Usage:
//!   tally normalize TEXT                      Show normalized text
//!   tally categorize DESC --rules rules.toml  Assign a category
//!   tally price 4.20 --history 4.5,4.75       Cheap, normal or expensive
//!   tally installments -a 100 -n 12 -c 1150   Installments vs cash

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let catalog = commands::load_catalog(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize { text } => commands::cmd_normalize(&catalog, &text, cli.json),
        Commands::Categorize {
            description,
            rules,
            explain,
        } => commands::cmd_categorize(&catalog, &description, rules.as_deref(), explain, cli.json),
        Commands::Price { price, history } => commands::cmd_price(price, &history, cli.json),
        Commands::Installments {
            amount,
            count,
            inflation,
            cash,
            schedule,
        } => commands::cmd_installments(amount, count, inflation, cash, schedule, cli.json),
        Commands::Catalog => commands::cmd_catalog(&catalog, cli.config.as_deref(), cli.json),
    }
}
