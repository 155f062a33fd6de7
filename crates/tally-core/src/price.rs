//! Price classification against personal purchase history
//!
//! A price is compared with the mean of what was paid before for the same
//! product or merchant. The bands are fixed and symmetric around the mean.

use serde::Serialize;
use tracing::debug;

use crate::models::{PriceLabel, PriceSample};
use crate::safe_math::{round_to_i64, safe_average, safe_divide_or};

/// Below this fraction of the historical mean a price is cheap
pub const CHEAP_RATIO: f64 = 0.9;

/// Above this fraction of the historical mean a price is expensive
pub const EXPENSIVE_RATIO: f64 = 1.1;

/// How a price compares with history
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceClassification {
    pub label: PriceLabel,
    /// Rounded percent difference from the historical mean
    pub delta_percent: i64,
    /// Mean of the positive historical prices
    pub average: f64,
    /// Number of historical prices that contributed to the mean
    pub sample_count: usize,
}

/// Classify `price` against `history`
///
/// Returns `None` when there is not enough data to say anything: empty
/// history, a non-positive (or non-finite) price, or no positive samples.
pub fn classify_price(price: f64, history: &[PriceSample]) -> Option<PriceClassification> {
    if history.is_empty() || !price.is_finite() || price <= 0.0 {
        return None;
    }

    let prices: Vec<f64> = history
        .iter()
        .map(|s| s.price)
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();

    let average = safe_average(&prices)?;
    if average <= 0.0 {
        return None;
    }

    let ratio = safe_divide_or(price, average, f64::NAN);
    if !ratio.is_finite() {
        return None;
    }

    let label = if ratio < CHEAP_RATIO {
        PriceLabel::Cheap
    } else if ratio > EXPENSIVE_RATIO {
        PriceLabel::Expensive
    } else {
        PriceLabel::Normal
    };
    let delta_percent = round_to_i64((ratio - 1.0) * 100.0);

    debug!(
        "Price {} vs average {:.2} over {} samples: {} ({}%)",
        price,
        average,
        prices.len(),
        label,
        delta_percent
    );

    Some(PriceClassification {
        label,
        delta_percent,
        average,
        sample_count: prices.len(),
    })
}

/// Classify `price` against bare historical amounts
pub fn classify_amounts(price: f64, history: &[f64]) -> Option<PriceClassification> {
    let samples: Vec<PriceSample> = history.iter().copied().map(PriceSample::from).collect();
    classify_price(price, &samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(prices: &[f64]) -> Vec<PriceSample> {
        prices.iter().copied().map(PriceSample::new).collect()
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(classify_price(100.0, &[]), None);
        assert_eq!(classify_price(0.0, &[]), None);
    }

    #[test]
    fn test_non_positive_price() {
        let history = samples(&[100.0]);
        assert_eq!(classify_price(0.0, &history), None);
        assert_eq!(classify_price(-5.0, &history), None);
        assert_eq!(classify_price(f64::NAN, &history), None);
        assert_eq!(classify_price(f64::INFINITY, &history), None);
    }

    #[test]
    fn test_no_positive_samples() {
        assert_eq!(classify_price(10.0, &samples(&[0.0, -3.0])), None);
        assert_eq!(classify_price(10.0, &samples(&[f64::NAN])), None);
    }

    #[test]
    fn test_same_price_is_normal() {
        let result = classify_price(100.0, &samples(&[100.0])).unwrap();
        assert_eq!(result.label, PriceLabel::Normal);
        assert_eq!(result.delta_percent, 0);
        assert_eq!(result.sample_count, 1);
    }

    #[test]
    fn test_cheap() {
        let result = classify_price(80.0, &samples(&[100.0, 100.0])).unwrap();
        assert_eq!(result.label, PriceLabel::Cheap);
        assert_eq!(result.delta_percent, -20);
        assert_eq!(result.average, 100.0);
    }

    #[test]
    fn test_expensive() {
        let result = classify_price(120.0, &samples(&[100.0])).unwrap();
        assert_eq!(result.label, PriceLabel::Expensive);
        assert_eq!(result.delta_percent, 20);
    }

    #[test]
    fn test_band_edges_are_normal() {
        let history = samples(&[100.0]);
        assert_eq!(
            classify_price(90.0, &history).unwrap().label,
            PriceLabel::Normal
        );
        assert_eq!(
            classify_price(110.0, &history).unwrap().label,
            PriceLabel::Normal
        );
        assert_eq!(
            classify_price(89.0, &history).unwrap().label,
            PriceLabel::Cheap
        );
        assert_eq!(
            classify_price(111.0, &history).unwrap().label,
            PriceLabel::Expensive
        );
    }

    #[test]
    fn test_non_positive_samples_ignored() {
        let result = classify_price(50.0, &samples(&[0.0, 50.0, -10.0, 50.0])).unwrap();
        assert_eq!(result.label, PriceLabel::Normal);
        assert_eq!(result.sample_count, 2);
    }

    #[test]
    fn test_mean_of_history() {
        // Mean of 8, 10, 12 is 10
        let result = classify_amounts(13.0, &[8.0, 10.0, 12.0]).unwrap();
        assert_eq!(result.label, PriceLabel::Expensive);
        assert_eq!(result.delta_percent, 30);
    }
}
