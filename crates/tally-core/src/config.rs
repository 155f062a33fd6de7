//! Engine catalog configuration
//!
//! The catalog holds the normalizer's alias table and the built-in keyword
//! categories. Decision thresholds are constants in their modules and are
//! not configurable here.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/tally/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! An explicit path takes the place of the data-dir override.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::matcher::CategoryMatcher;
use crate::models::{Alias, Category};
use crate::normalize::TextNormalizer;

/// Embedded default catalog (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Alias table and built-in keyword categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Alias substitutions, in application order
    #[serde(default)]
    pub aliases: Vec<Alias>,
    /// Keyword categories consulted when no rule matches
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl EngineConfig {
    /// A catalog with no aliases and no categories
    pub fn empty() -> Self {
        Self {
            aliases: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Parse a catalog from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid catalog TOML: {}", e)))
    }

    /// Load the catalog (override first, then embedded default)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        let content = match path {
            Some(path) if path.exists() => {
                debug!("Loading engine catalog from {}", path.display());
                fs::read_to_string(&path)?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        Self::from_toml(&content)
    }

    /// Build a normalizer owning this catalog's alias table
    pub fn normalizer(&self) -> TextNormalizer {
        TextNormalizer::new(self.aliases.clone())
    }

    /// Build a matcher using this catalog's alias table
    pub fn matcher(&self) -> CategoryMatcher {
        CategoryMatcher::new(self.normalizer())
    }

    /// Look up a built-in category by id
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

impl Default for EngineConfig {
    /// The embedded catalog
    fn default() -> Self {
        Self::from_toml(DEFAULT_CONFIG).unwrap_or_else(|e| {
            warn!("Embedded engine catalog is invalid, using empty catalog: {}", e);
            Self::empty()
        })
    }
}

/// Default catalog override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("engine.toml"))
}
