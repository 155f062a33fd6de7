//! Installment plan evaluation
//!
//! Discounts each future installment by a monthly rate derived from an
//! annual inflation assumption, giving the plan's value in today's money,
//! and compares it with a cash price when one is known.
//!
//! ```text
//! monthly_rate  = (1 + annual / 100)^(1/12) - 1
//! present_value = Σ_{k=1..count} amount / (1 + monthly_rate)^k
//! ```

use serde::Serialize;
use tracing::debug;

use crate::models::{InstallmentPlan, InstallmentVerdict};
use crate::safe_math::{round_to_i64, safe_divide_or, safe_percentage, safe_round};

/// Differences within ±this percent are reported as [`InstallmentVerdict::Similar`]
pub const SIMILARITY_BAND_PERCENT: i64 = 3;

/// Plan economics, plus the cash comparison when a cash price was given
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstallmentResult {
    /// Discounted value of all installments, rounded
    pub present_value: i64,
    /// Undiscounted face value (amount × count), rounded
    pub total_nominal: i64,
    /// Effective monthly rate in percent, two decimals
    pub monthly_rate_percent: f64,
    pub cash_price: Option<f64>,
    pub difference_vs_cash: Option<i64>,
    pub difference_percent: Option<i64>,
    pub label: Option<InstallmentVerdict>,
}

/// One row of a discounting schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstallmentPayment {
    /// 1-based installment number
    pub number: u32,
    pub nominal: f64,
    /// This installment in today's money
    pub present_value: f64,
}

/// Effective monthly rate (as a fraction) for an annual percentage
///
/// An annual rate at or below -100% has no monthly equivalent and, like any
/// non-finite input, is treated as zero.
pub fn monthly_rate(annual_inflation_percent: f64) -> f64 {
    let annual = annual_inflation_percent / 100.0;
    if !annual.is_finite() || annual <= -1.0 {
        return 0.0;
    }
    let rate = (1.0 + annual).powf(1.0 / 12.0) - 1.0;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

impl InstallmentPlan {
    fn amount(&self) -> f64 {
        if self.installment_amount.is_finite() && self.installment_amount > 0.0 {
            self.installment_amount
        } else {
            0.0
        }
    }

    fn positive_cash_price(&self) -> Option<f64> {
        self.cash_price.filter(|c| c.is_finite() && *c > 0.0)
    }

    /// Unrounded present value of the plan
    pub fn present_value(&self) -> f64 {
        let amount = self.amount();
        let n = self.count as f64;
        let rate = monthly_rate(self.annual_inflation_percent);

        if self.count == 0 || amount == 0.0 {
            return 0.0;
        }
        if rate == 0.0 {
            return amount * n;
        }

        // Closed form of the geometric sum: amount * (1 - (1 + r)^-n) / r
        let discount = (1.0 + rate).powf(-n);
        let pv = safe_divide_or(amount * (1.0 - discount), rate, amount * n);
        if pv.is_finite() {
            pv
        } else {
            amount * n
        }
    }

    /// Per-installment discounting table
    pub fn schedule(&self) -> Vec<InstallmentPayment> {
        let amount = self.amount();
        let growth = 1.0 + monthly_rate(self.annual_inflation_percent);
        let mut factor = 1.0;

        (1..=self.count)
            .map(|number| {
                factor *= growth;
                InstallmentPayment {
                    number,
                    nominal: amount,
                    present_value: safe_divide_or(amount, factor, 0.0),
                }
            })
            .collect()
    }

    /// Evaluate the plan and compare it with the cash price, if any
    pub fn evaluate(&self) -> InstallmentResult {
        let rate = monthly_rate(self.annual_inflation_percent);
        let present_value = round_to_i64(self.present_value());
        let total_nominal = round_to_i64(self.amount() * self.count as f64);
        let monthly_rate_percent = safe_round(rate * 100.0, 2);

        let mut result = InstallmentResult {
            present_value,
            total_nominal,
            monthly_rate_percent,
            cash_price: None,
            difference_vs_cash: None,
            difference_percent: None,
            label: None,
        };

        let Some(cash) = self.positive_cash_price() else {
            return result;
        };

        let pv = present_value as f64;
        let difference = pv - cash;
        let difference_percent = round_to_i64(safe_percentage(difference, cash));

        let label = if difference_percent.abs() <= SIMILARITY_BAND_PERCENT {
            InstallmentVerdict::Similar
        } else if pv < cash {
            InstallmentVerdict::InstallmentsBetter
        } else {
            InstallmentVerdict::CashBetter
        };

        debug!(
            "{} x {} at {}%/yr: pv {} vs cash {} ({}%) -> {}",
            self.count,
            self.amount(),
            self.annual_inflation_percent,
            present_value,
            cash,
            difference_percent,
            label
        );

        result.cash_price = Some(cash);
        result.difference_vs_cash = Some(round_to_i64(difference));
        result.difference_percent = Some(difference_percent);
        result.label = Some(label);
        result
    }
}

/// Evaluate an installment plan against an optional cash price
pub fn evaluate_installments(
    installment_amount: f64,
    count: u32,
    annual_inflation_percent: f64,
    cash_price: Option<f64>,
) -> InstallmentResult {
    InstallmentPlan {
        installment_amount,
        count,
        annual_inflation_percent,
        cash_price,
    }
    .evaluate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_installment_no_inflation() {
        let result = evaluate_installments(1000.0, 1, 0.0, None);
        assert_eq!(result.present_value, 1000);
        assert_eq!(result.total_nominal, 1000);
        assert_eq!(result.monthly_rate_percent, 0.0);
    }

    #[test]
    fn test_no_inflation_equal_to_cash_is_similar() {
        let result = evaluate_installments(1000.0, 12, 0.0, Some(12000.0));
        assert_eq!(result.present_value, 12000);
        assert_eq!(result.difference_vs_cash, Some(0));
        assert_eq!(result.difference_percent, Some(0));
        assert_eq!(result.label, Some(InstallmentVerdict::Similar));
        assert_eq!(result.cash_price, Some(12000.0));
    }

    #[test]
    fn test_monthly_rate() {
        // 12.68% annual is ~1% monthly
        let rate = monthly_rate(12.682503013196972);
        assert!((rate - 0.01).abs() < 1e-12);
        assert_eq!(monthly_rate(0.0), 0.0);
        assert_eq!(monthly_rate(-100.0), 0.0);
        assert_eq!(monthly_rate(f64::NAN), 0.0);
        assert!(monthly_rate(-10.0) < 0.0);
    }

    #[test]
    fn test_present_value_discounts() {
        // 12 x 100 at ~1% monthly: 100 * (1 - 1.01^-12) / 0.01 = 1125.51
        let result = evaluate_installments(100.0, 12, 12.682503013196972, None);
        assert_eq!(result.present_value, 1126);
        assert_eq!(result.total_nominal, 1200);
        assert_eq!(result.monthly_rate_percent, 1.0);
    }

    #[test]
    fn test_closed_form_matches_schedule() {
        let plan = InstallmentPlan::new(250.0, 24, 8.5);
        let summed: f64 = plan.schedule().iter().map(|p| p.present_value).sum();
        assert!((plan.present_value() - summed).abs() < 1e-6);
    }

    #[test]
    fn test_installments_better() {
        // 10 x 100 at 40% inflation is clearly worth less than 1000 today
        let result = evaluate_installments(100.0, 10, 40.0, Some(1000.0));
        assert!(result.present_value < 1000);
        assert_eq!(result.label, Some(InstallmentVerdict::InstallmentsBetter));
        assert!(result.difference_percent.unwrap() < -3);
        assert!(result.difference_vs_cash.unwrap() < 0);
    }

    #[test]
    fn test_cash_better() {
        let result = evaluate_installments(110.0, 10, 0.0, Some(1000.0));
        assert_eq!(result.present_value, 1100);
        assert_eq!(result.difference_vs_cash, Some(100));
        assert_eq!(result.difference_percent, Some(10));
        assert_eq!(result.label, Some(InstallmentVerdict::CashBetter));
    }

    #[test]
    fn test_similarity_band_edges() {
        // +3% is still similar, +4% is not
        let similar = evaluate_installments(103.0, 10, 0.0, Some(1000.0));
        assert_eq!(similar.difference_percent, Some(3));
        assert_eq!(similar.label, Some(InstallmentVerdict::Similar));

        let cash = evaluate_installments(104.0, 10, 0.0, Some(1000.0));
        assert_eq!(cash.label, Some(InstallmentVerdict::CashBetter));

        let below = evaluate_installments(97.0, 10, 0.0, Some(1000.0));
        assert_eq!(below.label, Some(InstallmentVerdict::Similar));

        let inst = evaluate_installments(96.0, 10, 0.0, Some(1000.0));
        assert_eq!(inst.label, Some(InstallmentVerdict::InstallmentsBetter));
    }

    #[test]
    fn test_without_cash_price() {
        for cash in [None, Some(0.0), Some(-50.0), Some(f64::NAN)] {
            let result = evaluate_installments(500.0, 6, 5.0, cash);
            assert_eq!(result.cash_price, None);
            assert_eq!(result.difference_vs_cash, None);
            assert_eq!(result.difference_percent, None);
            assert_eq!(result.label, None);
            assert_eq!(result.total_nominal, 3000);
            assert!(result.present_value > 0 && result.present_value < 3000);
        }
    }

    #[test]
    fn test_negative_inflation_raises_present_value() {
        let result = evaluate_installments(100.0, 12, -10.0, None);
        assert!(result.present_value > 1200);
        assert!(result.monthly_rate_percent < 0.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let zero_count = evaluate_installments(100.0, 0, 5.0, Some(100.0));
        assert_eq!(zero_count.present_value, 0);
        assert_eq!(zero_count.total_nominal, 0);
        assert_eq!(zero_count.difference_percent, Some(-100));
        assert_eq!(
            zero_count.label,
            Some(InstallmentVerdict::InstallmentsBetter)
        );

        let nan_amount = evaluate_installments(f64::NAN, 12, 5.0, None);
        assert_eq!(nan_amount.present_value, 0);
        assert_eq!(nan_amount.total_nominal, 0);

        let collapse = evaluate_installments(100.0, 12, -100.0, None);
        assert_eq!(collapse.present_value, 1200);
        assert_eq!(collapse.monthly_rate_percent, 0.0);
    }

    #[test]
    fn test_schedule() {
        let plan = InstallmentPlan::new(100.0, 3, 0.0);
        let schedule = plan.schedule();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].number, 1);
        assert_eq!(schedule[2].number, 3);
        assert!(schedule.iter().all(|p| p.present_value == 100.0));

        let inflating = InstallmentPlan::new(100.0, 3, 20.0).schedule();
        assert!(inflating[0].present_value > inflating[1].present_value);
        assert!(inflating[1].present_value > inflating[2].present_value);
    }

    #[test]
    fn test_plan_builder() {
        let plan = InstallmentPlan::new(1000.0, 12, 0.0).with_cash_price(12000.0);
        assert_eq!(plan.evaluate(), evaluate_installments(1000.0, 12, 0.0, Some(12000.0)));
    }
}
