//! Price and installment command implementations

use anyhow::Result;
use tally_core::{
    classify_amounts, InstallmentPlan, InstallmentResult, InstallmentVerdict, PriceLabel,
};

use super::print_json;

pub fn cmd_price(price: f64, history: &[f64], json: bool) -> Result<()> {
    let result = classify_amounts(price, history);

    if json {
        return print_json(&result);
    }

    match result {
        Some(c) => {
            let icon = match c.label {
                PriceLabel::Cheap => "🟢",
                PriceLabel::Normal => "⚪",
                PriceLabel::Expensive => "🔴",
            };
            println!(
                "{} {} is {} ({:+}% vs average {:.2} over {} purchases)",
                icon, price, c.label, c.delta_percent, c.average, c.sample_count
            );
        }
        None => println!("❓ Not enough price history to classify {}", price),
    }

    Ok(())
}

/// One-line recommendation for an evaluated plan
pub fn verdict_message(result: &InstallmentResult) -> Option<String> {
    let label = result.label?;
    let percent = result.difference_percent.unwrap_or(0);
    Some(match label {
        InstallmentVerdict::Similar => {
            format!("Similar: within {}% of the cash price", percent.abs())
        }
        InstallmentVerdict::InstallmentsBetter => format!(
            "Installments are better: {}% cheaper in today's money",
            percent.abs()
        ),
        InstallmentVerdict::CashBetter => format!(
            "Cash is better: installments cost {}% more in today's money",
            percent.abs()
        ),
    })
}

pub fn cmd_installments(
    amount: f64,
    count: u32,
    inflation: f64,
    cash: Option<f64>,
    schedule: bool,
    json: bool,
) -> Result<()> {
    let plan = InstallmentPlan {
        installment_amount: amount,
        count,
        annual_inflation_percent: inflation,
        cash_price: cash,
    };
    let result = plan.evaluate();

    if json {
        if schedule {
            return print_json(&serde_json::json!({
                "result": result,
                "schedule": plan.schedule(),
            }));
        }
        return print_json(&result);
    }

    println!();
    println!("💳 {} x {:.2} at {}% annual inflation", count, amount, inflation);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Monthly rate:   {:.2}%", result.monthly_rate_percent);
    println!("   Total nominal:  {}", result.total_nominal);
    println!("   Present value:  {}", result.present_value);

    if let (Some(cash), Some(diff)) = (result.cash_price, result.difference_vs_cash) {
        println!("   Cash price:     {:.2}", cash);
        println!("   Difference:     {:+}", diff);
    }
    if let Some(message) = verdict_message(&result) {
        println!();
        println!("   {}", message);
    }

    if schedule {
        println!();
        println!("   #     Nominal    Today");
        for payment in plan.schedule() {
            println!(
                "   {:<4} {:>9.2} {:>9.2}",
                payment.number, payment.nominal, payment.present_value
            );
        }
    }

    Ok(())
}
