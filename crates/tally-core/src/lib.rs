//! Tally Core Library
//!
//! Decision and classification engine for the Tally personal tracker:
//! - Numeric guard primitives that never produce `NaN`/`Infinity`
//! - Description normalization with a configurable alias table
//! - Category matching via prioritized user rules and keyword categories
//! - Price classification against personal purchase history
//! - Installment plan present value versus a cash price
//! - Engine catalog (aliases, built-in categories) with file overrides
//!
//! Every engine function is pure and synchronous: callers supply the data
//! already loaded in memory and decide what to persist.

pub mod config;
pub mod error;
pub mod installments;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod price;
pub mod safe_math;

pub use config::{default_config_path, EngineConfig};
pub use error::{Error, Result};
pub use installments::{
    evaluate_installments, monthly_rate, InstallmentPayment, InstallmentResult,
    SIMILARITY_BAND_PERCENT,
};
pub use matcher::{match_category, matching_rules, CategoryMatch, CategoryMatcher, RuleSet};
pub use models::{
    Alias, Category, InstallmentPlan, InstallmentVerdict, MatchSource, MatchType, MatchWarning,
    PriceLabel, PriceSample, Rule,
};
pub use normalize::TextNormalizer;
pub use price::{classify_amounts, classify_price, PriceClassification, CHEAP_RATIO, EXPENSIVE_RATIO};
