//! Categorize command implementation

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tally_core::{Category, CategoryMatch, EngineConfig, Rule};

use super::{load_rule_file, print_json, RuleFile};

/// Outcome of categorizing one description
#[derive(Debug, Serialize)]
pub struct CategorizeReport {
    pub description: String,
    #[serde(flatten)]
    pub result: CategoryMatch,
    /// Every enabled rule that matches (only with --explain)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_rules: Option<Vec<Rule>>,
}

/// Rule file categories first, then the catalog's built-in ones
pub fn merged_categories(file: &RuleFile, catalog: &EngineConfig) -> Vec<Category> {
    file.categories
        .iter()
        .chain(catalog.categories.iter())
        .cloned()
        .collect()
}

pub fn categorize_report(
    catalog: &EngineConfig,
    description: &str,
    file: &RuleFile,
    explain: bool,
) -> CategorizeReport {
    let matcher = catalog.matcher();
    let categories = merged_categories(file, catalog);
    let result = matcher.match_category(description, &file.rules, &categories);

    let matching_rules = explain.then(|| {
        matcher
            .matching_rules(description, &file.rules)
            .into_iter()
            .cloned()
            .collect()
    });

    CategorizeReport {
        description: description.to_string(),
        result,
        matching_rules,
    }
}

pub fn cmd_categorize(
    catalog: &EngineConfig,
    description: &str,
    rules_path: Option<&Path>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let file = match rules_path {
        Some(path) => load_rule_file(path)?,
        None => RuleFile::default(),
    };

    let report = categorize_report(catalog, description, &file, explain);

    if json {
        return print_json(&report);
    }

    match (&report.result.category_id, report.result.source) {
        (Some(category), Some(source)) => {
            println!("🏷️  {} ({})", category, source);
        }
        _ => println!("❓ No category for '{}'", description),
    }

    if explain {
        println!("   Normalized: {}", report.result.normalized_description);

        let rules = report.matching_rules.as_deref().unwrap_or_default();
        if rules.is_empty() {
            println!("   No rules match");
        } else {
            println!("   Matching rules (evaluation order):");
            for rule in rules {
                println!(
                    "     [{:>4}] {:<11} {:<24} → {}",
                    rule.priority,
                    rule.match_type.as_str(),
                    rule.pattern,
                    rule.category_id
                );
            }
        }
    }

    for warning in &report.result.warnings {
        println!("   ⚠️  {}", warning);
    }

    Ok(())
}
