//! Core commands (normalize, catalog) and shared loading utilities

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tally_core::{default_config_path, Category, EngineConfig, Rule};
use tracing::debug;

use super::print_json;

/// User rules and extra categories loaded from a TOML file
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Load the engine catalog, honoring an explicit override path
pub fn load_catalog(path: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("Catalog file not found: {}", path.display());
        }
    }
    EngineConfig::load(path).context("Failed to load engine catalog")
}

/// Parse a rule file
pub fn parse_rule_file(content: &str) -> Result<RuleFile> {
    toml::from_str(content).context("Invalid rule file TOML")
}

/// Read and parse a rule file
pub fn load_rule_file(path: &Path) -> Result<RuleFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;
    let file = parse_rule_file(&content)
        .with_context(|| format!("Failed to parse rule file {}", path.display()))?;
    debug!(
        "Loaded {} rules and {} categories from {}",
        file.rules.len(),
        file.categories.len(),
        path.display()
    );
    Ok(file)
}

pub fn cmd_normalize(catalog: &EngineConfig, text: &str, json: bool) -> Result<()> {
    let normalized = catalog.normalizer().normalize(text);

    if json {
        return print_json(&serde_json::json!({
            "input": text,
            "normalized": normalized,
        }));
    }

    println!("{}", normalized);
    Ok(())
}

pub fn cmd_catalog(catalog: &EngineConfig, override_path: Option<&Path>, json: bool) -> Result<()> {
    if json {
        return print_json(catalog);
    }

    let source = match override_path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) if path.exists() => path.display().to_string(),
        _ => "embedded default".to_string(),
    };

    println!();
    println!("📚 Engine catalog ({})", source);
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Aliases ({}), applied in order:", catalog.aliases.len());
    for alias in &catalog.aliases {
        println!("     {:<20} → {}", alias.alias, alias.canonical);
    }

    println!();
    println!("   Categories ({}):", catalog.categories.len());
    let mut categories: Vec<&Category> = catalog.categories.iter().collect();
    categories.sort_by_key(|c| std::cmp::Reverse(c.priority));
    for category in categories {
        println!(
            "     [{:>4}] {:<16} {}",
            category.priority,
            category.id,
            category.keywords.join(", ")
        );
    }

    Ok(())
}
