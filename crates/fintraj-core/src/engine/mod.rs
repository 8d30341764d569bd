//! Run orchestration: single deterministic passes, Monte Carlo fan-out,
//! and what-if branching (see `branch`).

pub mod branch;
pub mod kernel;
pub mod state;

use chrono::{Days, Utc};
use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::error::FinTrajError;
use crate::fx::FxEngine;
use crate::rng::SimRng;
use crate::types::{FinalBalance, SimulationInput, SimulationOutput};
use crate::FinTrajResult;
use kernel::DayComponent;
use state::SimulationState;

const MAX_HORIZON_DAYS: u32 = 3650;
const MAX_MONTE_CARLO_RUNS: u32 = 1000;

/// Run a complete simulation: a Monte Carlo fan-out when configured with
/// more than one run, otherwise a single deterministic pass. The input is
/// never mutated; identical inputs produce identical outputs.
pub fn simulate(input: &SimulationInput) -> FinTrajResult<SimulationOutput> {
    simulate_with_config(input, &EngineConfig::default())
}

pub fn simulate_with_config(
    input: &SimulationInput,
    config: &EngineConfig,
) -> FinTrajResult<SimulationOutput> {
    validate(input)?;
    let runs = input.monte_carlo_config.as_ref().map_or(1, |mc| mc.runs);
    if runs <= 1 {
        single_run(input, input.seed, config)
    } else {
        monte_carlo(input, runs, config)
    }
}

/// One deterministic pass, ignoring any Monte Carlo configuration.
pub fn simulate_single_run(
    input: &SimulationInput,
    seed_override: Option<u64>,
) -> FinTrajResult<SimulationOutput> {
    validate(input)?;
    single_run(
        input,
        seed_override.unwrap_or(input.seed),
        &EngineConfig::default(),
    )
}

fn single_run(
    input: &SimulationInput,
    seed: u64,
    config: &EngineConfig,
) -> FinTrajResult<SimulationOutput> {
    let mut state = SimulationState::new(input, config);
    let mut fx = FxEngine::new(&input.exchange_rates);
    let mut rng = SimRng::new(seed);
    let order = DayComponent::execution_order()?;

    let mut snapshots = Vec::with_capacity(input.horizon_days as usize);
    for day in 0..input.horizon_days {
        kernel::run_day(&mut state, &mut fx, &mut rng, &order, day)?;
        let date = config
            .epoch
            .checked_add_days(Days::new(u64::from(day)))
            .ok_or_else(|| FinTrajError::NonFinite {
                context: format!("snapshot date for day {day}"),
            })?;
        snapshots.push(state.snapshot(date));
    }

    let vibe = state.vibe_state();
    let collapse_probability = if state.collapse_day.is_some() {
        Decimal::ONE
    } else {
        Decimal::ZERO
    };

    Ok(SimulationOutput {
        seed,
        horizon_days: input.horizon_days,
        base_currency: input.base_currency.clone(),
        computed_at: Utc::now(),
        final_balance: FinalBalance {
            expected: state.balance,
            p5: state.balance,
            p95: state.balance,
        },
        collapse_probability,
        collapse_day: state.collapse_day,
        vibe_state: vibe,
        pet_state: vibe.pet(),
        final_credit_score: state.credit_score,
        shock_resilience_index: state.shock_resilience_index(),
        final_nav: state.asset_nav(),
        final_liquidity_ratio: state.liquidity_ratio(),
        snapshots,
    })
}

/// Fan out over `runs` seeds and reduce the final balances.
///
/// The primary run (the input seed) dominates every non-statistical field;
/// offset seeds contribute only their final balance and collapse flag.
/// Results are collected in seed order, so a parallel executor would have
/// to sort by run index before this reduction to stay bit-exact.
fn monte_carlo(
    input: &SimulationInput,
    runs: u32,
    config: &EngineConfig,
) -> FinTrajResult<SimulationOutput> {
    let mut primary = single_run(input, input.seed, config)?;

    let mut final_balances: Vec<Decimal> = Vec::with_capacity(runs as usize);
    let mut collapse_count: u32 = 0;
    final_balances.push(primary.final_balance.expected);
    if primary.collapse_day.is_some() {
        collapse_count += 1;
    }

    for i in 1..runs {
        let run = single_run(input, input.seed.wrapping_add(u64::from(i)), config)?;
        final_balances.push(run.final_balance.expected);
        if run.collapse_day.is_some() {
            collapse_count += 1;
        }
    }

    final_balances.sort();
    let n = final_balances.len();
    let total: Decimal = final_balances.iter().copied().sum();
    let expected = total / Decimal::from(n as u64);
    // Index arithmetic stays in integers: floor(n * 0.05) == n * 5 / 100.
    let p5 = final_balances[n * 5 / 100];
    let p95 = final_balances[(n * 95 / 100).min(n - 1)];

    primary.final_balance = FinalBalance { expected, p5, p95 };
    primary.collapse_probability = Decimal::from(collapse_count) / Decimal::from(runs);
    Ok(primary)
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, reason: impl Into<String>) -> FinTrajError {
    FinTrajError::InvalidInput {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn check_currency(field: &str, code: &str) -> FinTrajResult<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(invalid(field, format!("'{code}' is not an uppercase 3-letter code")))
    }
}

fn check_schedule(field: &str, start_day: u32, end_day: Option<u32>) -> FinTrajResult<()> {
    if let Some(end) = end_day {
        if end < start_day {
            return Err(invalid(
                &format!("{field}.endDay"),
                format!("endDay {end} is before startDay {start_day}"),
            ));
        }
    }
    Ok(())
}

fn check_unit_range(field: &str, value: Decimal) -> FinTrajResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(invalid(field, "must lie in [0, 1]"));
    }
    Ok(())
}

/// Apply every structural invariant of the input model. Collaborator layers
/// are expected to have validated already; this is the engine's own guard.
pub fn validate(input: &SimulationInput) -> FinTrajResult<()> {
    if input.horizon_days < 1 || input.horizon_days > MAX_HORIZON_DAYS {
        return Err(invalid(
            "horizonDays",
            format!("must be between 1 and {MAX_HORIZON_DAYS}"),
        ));
    }
    check_currency("baseCurrency", &input.base_currency)?;

    for stream in &input.income_streams {
        if stream.amount <= Decimal::ZERO {
            return Err(invalid("incomeStreams.amount", "must be positive"));
        }
        check_currency("incomeStreams.currency", &stream.currency)?;
        check_schedule("incomeStreams", stream.start_day, stream.end_day)?;
    }

    for expense in &input.expenses {
        if expense.amount <= Decimal::ZERO {
            return Err(invalid("expenses.amount", "must be positive"));
        }
        check_currency("expenses.currency", &expense.currency)?;
        check_schedule("expenses", expense.start_day, expense.end_day)?;
    }

    for asset in &input.assets {
        if asset.value < Decimal::ZERO {
            return Err(invalid("assets.value", "must be non-negative"));
        }
        if !(0.0..=1.0).contains(&asset.volatility) {
            return Err(invalid("assets.volatility", "must lie in [0, 1]"));
        }
        check_unit_range("assets.liquidationPenalty", asset.liquidation_penalty)?;
        check_currency("assets.currency", &asset.currency)?;
    }

    for liability in &input.liabilities {
        if liability.principal <= Decimal::ZERO {
            return Err(invalid("liabilities.principal", "must be positive"));
        }
        if liability.interest_rate < Decimal::ZERO {
            return Err(invalid("liabilities.interestRate", "must be non-negative"));
        }
        if liability.minimum_payment < Decimal::ZERO {
            return Err(invalid("liabilities.minimumPayment", "must be non-negative"));
        }
        if liability.remaining_term_days == 0 {
            return Err(invalid("liabilities.remainingTermDays", "must be positive"));
        }
        check_currency("liabilities.currency", &liability.currency)?;
    }

    for rate in &input.exchange_rates {
        if rate.rate <= Decimal::ZERO {
            return Err(invalid("exchangeRates.rate", "must be positive"));
        }
        if !(0.0..=1.0).contains(&rate.volatility) {
            return Err(invalid("exchangeRates.volatility", "must lie in [0, 1]"));
        }
        check_currency("exchangeRates.from", &rate.from)?;
        check_currency("exchangeRates.to", &rate.to)?;
    }

    if let Some(tax) = &input.tax_config {
        if tax.brackets.is_empty() {
            return Err(invalid("taxConfig.brackets", "at least one bracket required"));
        }
        for bracket in &tax.brackets {
            if bracket.upper_bound <= Decimal::ZERO {
                return Err(invalid("taxConfig.brackets.upperBound", "must be positive"));
            }
            check_unit_range("taxConfig.brackets.rate", bracket.rate)?;
        }
        check_unit_range("taxConfig.capitalGainsRate", tax.capital_gains_rate)?;
        check_currency("taxConfig.currency", &tax.currency)?;
    }

    if let Some(mc) = &input.monte_carlo_config {
        if mc.runs < 1 || mc.runs > MAX_MONTE_CARLO_RUNS {
            return Err(invalid(
                "monteCarloConfig.runs",
                format!("must be between 1 and {MAX_MONTE_CARLO_RUNS}"),
            ));
        }
        if mc.perturbation_factor < Decimal::ZERO
            || mc.perturbation_factor > rust_decimal_macros::dec!(0.5)
        {
            return Err(invalid(
                "monteCarloConfig.perturbationFactor",
                "must lie in [0, 0.5]",
            ));
        }
    }

    Ok(())
}
