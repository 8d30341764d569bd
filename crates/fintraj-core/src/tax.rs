//! Progressive income tax and flat capital-gains tax, in exact decimals.

use rust_decimal::Decimal;

use crate::types::{Money, TaxBracket, TaxConfig};

/// Income-tax / capital-gains split for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTax {
    pub income_tax: Money,
    pub capital_gains_tax: Money,
    pub total_tax: Money,
}

/// Progressive marginal tax over the bracket table.
///
/// Brackets are walked in ascending upperBound order; income above the top
/// bracket is taxed at the top bracket's rate. Zero or negative income owes
/// nothing.
pub fn compute_progressive_tax(annual_income: Money, config: &TaxConfig) -> Money {
    if annual_income <= Decimal::ZERO || config.brackets.is_empty() {
        return Decimal::ZERO;
    }

    let mut brackets: Vec<TaxBracket> = config.brackets.clone();
    brackets.sort_by(|a, b| a.upper_bound.cmp(&b.upper_bound));

    let mut tax = Decimal::ZERO;
    let mut remaining = annual_income;
    let mut prev_bound = Decimal::ZERO;
    for bracket in &brackets {
        let span = bracket.upper_bound - prev_bound;
        let taxed = remaining.min(span);
        if taxed > Decimal::ZERO {
            tax += taxed * bracket.rate;
            remaining -= taxed;
        }
        prev_bound = bracket.upper_bound;
        if remaining <= Decimal::ZERO {
            return tax;
        }
    }

    if let Some(top) = brackets.last() {
        tax += remaining * top.rate;
    }
    tax
}

/// Flat-rate tax on realized gains; losses owe nothing.
pub fn compute_capital_gains_tax(realized_gains: Money, config: &TaxConfig) -> Money {
    realized_gains.max(Decimal::ZERO) * config.capital_gains_rate
}

/// Tax owed for a single day.
///
/// The income portion is the marginal delta between the progressive tax on
/// year-to-date income with and without today's income, so the daily
/// amounts sum exactly to the annual progressive tax. Capital gains are
/// taxed on the day they are realized.
pub fn compute_daily_tax(
    daily_income: Money,
    daily_realized_gains: Money,
    cumulative_annual_income: Money,
    config: &TaxConfig,
) -> DailyTax {
    let income_tax = compute_progressive_tax(cumulative_annual_income + daily_income, config)
        - compute_progressive_tax(cumulative_annual_income, config);
    let capital_gains_tax = compute_capital_gains_tax(daily_realized_gains, config);
    DailyTax {
        income_tax,
        capital_gains_tax,
        total_tax: income_tax + capital_gains_tax,
    }
}
