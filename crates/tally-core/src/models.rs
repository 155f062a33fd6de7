//! Data models for Tally
//!
//! All records are plain values supplied by the caller. The engine borrows
//! them for the duration of a call and never keeps them.

use serde::{Deserialize, Serialize};

// ========== Category Rules ==========

/// How a rule pattern is compared against a normalized description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Case-insensitive substring match
    Includes,
    /// Case-insensitive prefix match
    #[serde(alias = "startsWith", alias = "starts-with")]
    StartsWith,
    /// Case-insensitive regular expression
    Regex,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::StartsWith => "starts_with",
            Self::Regex => "regex",
        }
    }
}

impl std::str::FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "includes" | "contains" => Ok(Self::Includes),
            "starts_with" | "startswith" | "starts-with" => Ok(Self::StartsWith),
            "regex" => Ok(Self::Regex),
            _ => Err(format!("Unknown match type: {}", s)),
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_enabled() -> bool {
    true
}

/// A user-authored pattern → category mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// The pattern to match against normalized descriptions
    pub pattern: String,
    pub match_type: MatchType,
    pub category_id: String,
    /// Higher priority rules are checked first
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Rule {
    /// Create an enabled rule
    pub fn new(
        pattern: impl Into<String>,
        match_type: MatchType,
        category_id: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            match_type,
            category_id: category_id.into(),
            priority,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A category with keywords used when no rule matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Substrings implying this category, checked in declared order
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub priority: i32,
}

impl Category {
    pub fn new<S: Into<String>>(id: impl Into<String>, keywords: Vec<S>, priority: i32) -> Self {
        Self {
            id: id.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            priority,
        }
    }
}

/// Where a category assignment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// An explicit user rule
    Rule,
    /// A category keyword (fallback)
    Keyword,
}

impl MatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Keyword => "keyword",
        }
    }
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rule that was skipped during matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchWarning {
    /// Regex pattern failed to compile; the rule never matches
    InvalidRegex {
        pattern: String,
        category_id: String,
        message: String,
    },
    /// Empty pattern; the rule never matches
    EmptyPattern { category_id: String },
}

impl std::fmt::Display for MatchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegex {
                pattern,
                category_id,
                message,
            } => write!(
                f,
                "invalid regex '{}' for category '{}' skipped: {}",
                pattern, category_id, message
            ),
            Self::EmptyPattern { category_id } => {
                write!(f, "empty pattern for category '{}' skipped", category_id)
            }
        }
    }
}

// ========== Text Normalization ==========

/// One alias → canonical substitution (e.g. a wallet-app nickname)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub alias: String,
    pub canonical: String,
}

impl Alias {
    pub fn new(alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            canonical: canonical.into(),
        }
    }
}

// ========== Price History ==========

/// One past paid price for a product/merchant key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub price: f64,
}

impl PriceSample {
    pub fn new(price: f64) -> Self {
        Self { price }
    }
}

impl From<f64> for PriceSample {
    fn from(price: f64) -> Self {
        Self { price }
    }
}

/// Price relative to personal purchase history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLabel {
    Cheap,
    Normal,
    Expensive,
}

impl PriceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cheap => "cheap",
            Self::Normal => "normal",
            Self::Expensive => "expensive",
        }
    }
}

impl std::str::FromStr for PriceLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cheap" => Ok(Self::Cheap),
            "normal" => Ok(Self::Normal),
            "expensive" => Ok(Self::Expensive),
            _ => Err(format!("Unknown price label: {}", s)),
        }
    }
}

impl std::fmt::Display for PriceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== Installments ==========

/// An installment plan, optionally with the cash price it competes against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub installment_amount: f64,
    pub count: u32,
    /// Annual inflation assumption in percent (may be negative)
    #[serde(default)]
    pub annual_inflation_percent: f64,
    #[serde(default)]
    pub cash_price: Option<f64>,
}

impl InstallmentPlan {
    pub fn new(installment_amount: f64, count: u32, annual_inflation_percent: f64) -> Self {
        Self {
            installment_amount,
            count,
            annual_inflation_percent,
            cash_price: None,
        }
    }

    pub fn with_cash_price(mut self, cash_price: f64) -> Self {
        self.cash_price = Some(cash_price);
        self
    }
}

/// Which option is better in today's money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentVerdict {
    InstallmentsBetter,
    CashBetter,
    /// Within the similarity band; no preference shown
    Similar,
}

impl InstallmentVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InstallmentsBetter => "installments_better",
            Self::CashBetter => "cash_better",
            Self::Similar => "similar",
        }
    }
}

impl std::fmt::Display for InstallmentVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_type_as_str() {
        assert_eq!(MatchType::Includes.as_str(), "includes");
        assert_eq!(MatchType::StartsWith.as_str(), "starts_with");
        assert_eq!(MatchType::Regex.as_str(), "regex");
    }

    #[test]
    fn test_match_type_from_str() {
        assert_eq!("includes".parse::<MatchType>().unwrap(), MatchType::Includes);
        assert_eq!(
            "startsWith".parse::<MatchType>().unwrap(),
            MatchType::StartsWith
        );
        assert_eq!(
            "starts-with".parse::<MatchType>().unwrap(),
            MatchType::StartsWith
        );
        assert_eq!("REGEX".parse::<MatchType>().unwrap(), MatchType::Regex);
        assert!("fuzzy".parse::<MatchType>().is_err());
    }

    #[test]
    fn test_match_type_serde() {
        let json = serde_json::to_string(&MatchType::StartsWith).unwrap();
        assert_eq!(json, r#""starts_with""#);

        let parsed: MatchType = serde_json::from_str(r#""regex""#).unwrap();
        assert_eq!(parsed, MatchType::Regex);
    }

    #[test]
    fn test_match_type_spellings_in_toml() {
        #[derive(Deserialize)]
        struct RuleList {
            rules: Vec<Rule>,
        }

        let list: RuleList = toml::from_str(
            r#"
            [[rules]]
            pattern = "uber"
            match_type = "startsWith"
            category_id = "transport"

            [[rules]]
            pattern = "lyft"
            match_type = "starts-with"
            category_id = "transport"

            [[rules]]
            pattern = "bolt"
            match_type = "starts_with"
            category_id = "transport"
            "#,
        )
        .unwrap();
        assert_eq!(list.rules.len(), 3);
        assert!(list
            .rules
            .iter()
            .all(|r| r.match_type == MatchType::StartsWith));

        // Serialization keeps the canonical spelling
        let json = serde_json::to_string(&list.rules[0].match_type).unwrap();
        assert_eq!(json, r#""starts_with""#);
    }

    #[test]
    fn test_rule_defaults_when_deserialized() {
        let rule: Rule = serde_json::from_str(
            r#"{"pattern": "netflix", "match_type": "includes", "category_id": "subs"}"#,
        )
        .unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.priority, 0);
    }

    #[test]
    fn test_rule_disabled_builder() {
        let rule = Rule::new("uber", MatchType::Includes, "transport", 5).disabled();
        assert!(!rule.enabled);
        assert_eq!(rule.priority, 5);
    }

    #[test]
    fn test_price_label_round_trip() {
        for label in [PriceLabel::Cheap, PriceLabel::Normal, PriceLabel::Expensive] {
            assert_eq!(label.as_str().parse::<PriceLabel>().unwrap(), label);
        }
        assert!("bargain".parse::<PriceLabel>().is_err());
    }

    #[test]
    fn test_verdict_serde() {
        let json = serde_json::to_string(&InstallmentVerdict::InstallmentsBetter).unwrap();
        assert_eq!(json, r#""installments_better""#);
    }

    #[test]
    fn test_warning_serde_is_tagged() {
        let warning = MatchWarning::EmptyPattern {
            category_id: "food".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "empty_pattern");
        assert_eq!(json["category_id"], "food");
    }
}
