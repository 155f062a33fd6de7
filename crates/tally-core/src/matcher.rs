//! Category matching for transaction descriptions
//!
//! Priority: enabled user rules (highest priority first) → category keywords
//! (highest priority first) → no category.
//!
//! Rules short-circuit: once a rule hits, lower-priority rules and the
//! keyword fallback are never consulted. Ties in priority keep the caller's
//! original order. A rule that cannot be evaluated (bad regex, empty pattern)
//! is skipped and reported through [`CategoryMatch::warnings`]; nothing here
//! returns an error.

use std::cmp::Reverse;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{Category, MatchSource, MatchType, MatchWarning, Rule};
use crate::normalize::TextNormalizer;

/// Result of matching one description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatch {
    pub category_id: Option<String>,
    pub source: Option<MatchSource>,
    /// Priority of the rule or category that matched
    pub priority: Option<i32>,
    /// The description after normalization
    pub normalized_description: String,
    /// Rules skipped because they could not be evaluated
    pub warnings: Vec<MatchWarning>,
}

impl CategoryMatch {
    fn unmatched(normalized_description: String, warnings: Vec<MatchWarning>) -> Self {
        Self {
            category_id: None,
            source: None,
            priority: None,
            normalized_description,
            warnings,
        }
    }

    pub fn is_match(&self) -> bool {
        self.category_id.is_some()
    }
}

/// A rule pattern prepared for evaluation
#[derive(Debug)]
enum CompiledPattern {
    Includes(String),
    StartsWith(String),
    Regex(Regex),
}

impl CompiledPattern {
    fn is_match(&self, normalized: &str) -> bool {
        match self {
            Self::Includes(p) => normalized.contains(p.as_str()),
            Self::StartsWith(p) => normalized.starts_with(p.as_str()),
            Self::Regex(re) => re.is_match(normalized),
        }
    }
}

/// Enabled rules in evaluation order, with patterns compiled once
///
/// Build one per rule list and reuse it when categorizing many descriptions.
#[derive(Debug)]
pub struct RuleSet<'a> {
    rules: Vec<(&'a Rule, CompiledPattern)>,
    warnings: Vec<MatchWarning>,
}

impl<'a> RuleSet<'a> {
    /// Filter to enabled rules, order by descending priority, compile patterns
    pub fn compile(rules: &'a [Rule]) -> Self {
        let mut enabled: Vec<&'a Rule> = rules.iter().filter(|r| r.enabled).collect();
        // Stable: equal priorities keep their original order
        enabled.sort_by_key(|r| Reverse(r.priority));

        let mut compiled = Vec::with_capacity(enabled.len());
        let mut warnings = Vec::new();

        for rule in enabled {
            if rule.pattern.is_empty() {
                warn!("Skipping rule for '{}': empty pattern", rule.category_id);
                warnings.push(MatchWarning::EmptyPattern {
                    category_id: rule.category_id.clone(),
                });
                continue;
            }

            let pattern = match rule.match_type {
                MatchType::Includes => CompiledPattern::Includes(rule.pattern.to_lowercase()),
                MatchType::StartsWith => CompiledPattern::StartsWith(rule.pattern.to_lowercase()),
                MatchType::Regex => {
                    match RegexBuilder::new(&rule.pattern)
                        .case_insensitive(true)
                        .build()
                    {
                        Ok(re) => CompiledPattern::Regex(re),
                        Err(e) => {
                            warn!(
                                "Skipping rule for '{}': invalid regex '{}': {}",
                                rule.category_id, rule.pattern, e
                            );
                            warnings.push(MatchWarning::InvalidRegex {
                                pattern: rule.pattern.clone(),
                                category_id: rule.category_id.clone(),
                                message: e.to_string(),
                            });
                            continue;
                        }
                    }
                }
            };
            compiled.push((rule, pattern));
        }

        Self {
            rules: compiled,
            warnings,
        }
    }

    /// Rules that could not be compiled
    pub fn warnings(&self) -> &[MatchWarning] {
        &self.warnings
    }

    /// Number of evaluable rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching an already-normalized description
    pub fn first_match(&self, normalized: &str) -> Option<&'a Rule> {
        self.rules
            .iter()
            .find(|(_, pattern)| pattern.is_match(normalized))
            .map(|(rule, _)| *rule)
    }

    /// Every rule matching an already-normalized description, in evaluation order
    pub fn all_matches(&self, normalized: &str) -> Vec<&'a Rule> {
        self.rules
            .iter()
            .filter(|(_, pattern)| pattern.is_match(normalized))
            .map(|(rule, _)| *rule)
            .collect()
    }
}

/// First category (by descending priority) with a keyword contained in the
/// normalized description
fn keyword_match<'c>(normalized: &str, categories: &'c [Category]) -> Option<&'c Category> {
    let mut ordered: Vec<&Category> = categories.iter().collect();
    ordered.sort_by_key(|c| Reverse(c.priority));

    ordered.into_iter().find(|category| {
        category
            .keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| normalized.contains(k.to_lowercase().as_str()))
    })
}

/// Rule and keyword category matcher
#[derive(Debug, Clone, Default)]
pub struct CategoryMatcher {
    normalizer: TextNormalizer,
}

impl CategoryMatcher {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Match one description against rules, then category keywords
    pub fn match_category(
        &self,
        description: &str,
        rules: &[Rule],
        categories: &[Category],
    ) -> CategoryMatch {
        if description.trim().is_empty() {
            return CategoryMatch::unmatched(String::new(), Vec::new());
        }
        let rule_set = RuleSet::compile(rules);
        self.match_with(description, &rule_set, categories)
    }

    /// Match one description against a precompiled rule set
    pub fn match_with(
        &self,
        description: &str,
        rules: &RuleSet<'_>,
        categories: &[Category],
    ) -> CategoryMatch {
        let warnings = rules.warnings().to_vec();
        let normalized = self.normalizer.normalize(description);
        if normalized.is_empty() {
            return CategoryMatch::unmatched(normalized, warnings);
        }

        if let Some(rule) = rules.first_match(&normalized) {
            debug!(
                "Rule matched for '{}': {} ({} '{}', priority {})",
                normalized, rule.category_id, rule.match_type, rule.pattern, rule.priority
            );
            return CategoryMatch {
                category_id: Some(rule.category_id.clone()),
                source: Some(MatchSource::Rule),
                priority: Some(rule.priority),
                normalized_description: normalized,
                warnings,
            };
        }

        if let Some(category) = keyword_match(&normalized, categories) {
            debug!("Keyword matched for '{}': {}", normalized, category.id);
            return CategoryMatch {
                category_id: Some(category.id.clone()),
                source: Some(MatchSource::Keyword),
                priority: Some(category.priority),
                normalized_description: normalized,
                warnings,
            };
        }

        debug!("No category for '{}'", normalized);
        CategoryMatch::unmatched(normalized, warnings)
    }

    /// Match many descriptions, compiling the rules once
    pub fn categorize_all<S: AsRef<str>>(
        &self,
        descriptions: &[S],
        rules: &[Rule],
        categories: &[Category],
    ) -> Vec<CategoryMatch> {
        let rule_set = RuleSet::compile(rules);
        descriptions
            .iter()
            .map(|d| self.match_with(d.as_ref(), &rule_set, categories))
            .collect()
    }

    /// Every enabled rule that matches a description, in evaluation order
    pub fn matching_rules<'r>(&self, description: &str, rules: &'r [Rule]) -> Vec<&'r Rule> {
        let normalized = self.normalizer.normalize(description);
        if normalized.is_empty() {
            return Vec::new();
        }
        RuleSet::compile(rules).all_matches(&normalized)
    }
}

fn default_matcher() -> &'static CategoryMatcher {
    static MATCHER: OnceLock<CategoryMatcher> = OnceLock::new();
    MATCHER.get_or_init(CategoryMatcher::default)
}

/// Category id for a description using the built-in alias table
pub fn match_category(description: &str, rules: &[Rule], categories: &[Category]) -> Option<String> {
    default_matcher()
        .match_category(description, rules, categories)
        .category_id
}

/// Every enabled rule matching a description using the built-in alias table
pub fn matching_rules<'r>(description: &str, rules: &'r [Rule]) -> Vec<&'r Rule> {
    default_matcher().matching_rules(description, rules)
}
