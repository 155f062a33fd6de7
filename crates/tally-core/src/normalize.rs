//! Description normalization
//!
//! Canonicalizes free text before matching: lower-cases, trims, and collapses
//! known merchant/wallet nicknames to one canonical name. The alias table is
//! owned by the normalizer, so callers (and tests) can swap it freely.

use regex::{NoExpand, Regex};
use tracing::warn;

use crate::config::EngineConfig;
use crate::models::Alias;

/// One alias compiled to a whole-word pattern
#[derive(Debug, Clone)]
struct CompiledAlias {
    alias: Alias,
    pattern: Regex,
}

/// Lower-casing, alias-substituting text normalizer
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Lower-cased aliases in application order
    aliases: Vec<Alias>,
    compiled: Vec<CompiledAlias>,
}

impl TextNormalizer {
    /// Create a normalizer with an explicit alias table
    ///
    /// Aliases are applied in the given order. Entries with an empty alias
    /// are dropped.
    pub fn new(aliases: Vec<Alias>) -> Self {
        let compiled: Vec<CompiledAlias> = aliases
            .into_iter()
            .filter_map(|a| {
                let alias = a.alias.trim().to_lowercase();
                if alias.is_empty() {
                    return None;
                }
                // Half boundaries: no word character directly before or after
                let source = format!(r"\b{{start-half}}{}\b{{end-half}}", regex::escape(&alias));
                let pattern = match Regex::new(&source) {
                    Ok(pattern) => pattern,
                    Err(e) => {
                        warn!("Skipping alias '{}': {}", alias, e);
                        return None;
                    }
                };
                Some(CompiledAlias {
                    alias: Alias {
                        alias,
                        canonical: a.canonical.trim().to_lowercase(),
                    },
                    pattern,
                })
            })
            .collect();
        let aliases = compiled.iter().map(|c| c.alias.clone()).collect();
        Self { aliases, compiled }
    }

    /// A normalizer that only lower-cases and trims
    pub fn empty() -> Self {
        Self {
            aliases: Vec::new(),
            compiled: Vec::new(),
        }
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    /// Normalize a description
    pub fn normalize(&self, text: &str) -> String {
        let mut out = text.trim().to_lowercase();
        for entry in &self.compiled {
            if out.contains(entry.alias.alias.as_str()) {
                out = entry
                    .pattern
                    .replace_all(&out, NoExpand(&entry.alias.canonical))
                    .into_owned();
            }
        }
        out.trim().to_string()
    }

    /// Normalize an optional description; `None` becomes an empty string
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }
}

impl PartialEq for TextNormalizer {
    fn eq(&self, other: &Self) -> bool {
        self.aliases == other.aliases
    }
}

impl Eq for TextNormalizer {}

impl Default for TextNormalizer {
    /// The built-in alias table from the embedded catalog
    fn default() -> Self {
        EngineConfig::default().normalizer()
    }
}
