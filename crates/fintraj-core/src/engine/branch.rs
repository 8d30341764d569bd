//! What-if branching: a baseline run plus a divergent run that starts from
//! the baseline's balance at the branch day.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinTrajError;
use crate::types::{
    Asset, CurrencyCode, Expense, ExchangeRate, IncomeStream, Liability, MonteCarloConfig,
    Money, PetState, SimulationInput, SimulationOutput, TaxConfig, VibeState,
};
use crate::FinTrajResult;

/// Partial `SimulationInput`. Provided fields overwrite the base on merge;
/// absent fields fall through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationPatch {
    pub seed: Option<u64>,
    pub horizon_days: Option<u32>,
    pub base_currency: Option<CurrencyCode>,
    pub initial_balance: Option<Money>,
    pub income_streams: Option<Vec<IncomeStream>>,
    pub expenses: Option<Vec<Expense>>,
    pub assets: Option<Vec<Asset>>,
    pub liabilities: Option<Vec<Liability>>,
    pub exchange_rates: Option<Vec<ExchangeRate>>,
    pub tax_config: Option<TaxConfig>,
    pub monte_carlo_config: Option<MonteCarloConfig>,
}

/// Overlay a patch onto a base input.
pub fn merge_patch(base: &SimulationInput, patch: &SimulationPatch) -> SimulationInput {
    SimulationInput {
        seed: patch.seed.unwrap_or(base.seed),
        horizon_days: patch.horizon_days.unwrap_or(base.horizon_days),
        base_currency: patch
            .base_currency
            .clone()
            .unwrap_or_else(|| base.base_currency.clone()),
        initial_balance: patch.initial_balance.unwrap_or(base.initial_balance),
        income_streams: patch
            .income_streams
            .clone()
            .unwrap_or_else(|| base.income_streams.clone()),
        expenses: patch.expenses.clone().unwrap_or_else(|| base.expenses.clone()),
        assets: patch.assets.clone().unwrap_or_else(|| base.assets.clone()),
        liabilities: patch
            .liabilities
            .clone()
            .unwrap_or_else(|| base.liabilities.clone()),
        exchange_rates: patch
            .exchange_rates
            .clone()
            .unwrap_or_else(|| base.exchange_rates.clone()),
        tax_config: patch.tax_config.clone().or_else(|| base.tax_config.clone()),
        monte_carlo_config: patch
            .monte_carlo_config
            .clone()
            .or_else(|| base.monte_carlo_config.clone()),
    }
}

/// Baseline and branch outputs of one branching request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchResult {
    pub baseline: SimulationOutput,
    pub branch: SimulationOutput,
}

/// Run the baseline, then a branch whose horizon covers the remaining days
/// and whose starting balance is lifted from the baseline at the branch day.
pub fn simulate_branch(
    base: &SimulationInput,
    branch_at_day: u32,
    patch: &SimulationPatch,
) -> FinTrajResult<BranchResult> {
    if branch_at_day >= base.horizon_days {
        return Err(FinTrajError::InvalidInput {
            field: "branchAtDay".to_string(),
            reason: format!("must be below horizonDays ({})", base.horizon_days),
        });
    }

    let baseline = super::simulate(base)?;

    let mut branch_input = merge_patch(base, patch);
    branch_input.horizon_days = base.horizon_days - branch_at_day;
    branch_input.initial_balance = baseline
        .snapshots
        .get(branch_at_day as usize)
        .map_or(base.initial_balance, |snap| snap.balance);

    let branch = super::simulate(&branch_input)?;
    Ok(BranchResult { baseline, branch })
}

/// A before/after pair for a qualitative label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChange<T> {
    pub from: T,
    pub to: T,
}

/// Per-metric differences, each computed as branch minus baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDeltas {
    pub final_balance_diff: Money,
    pub collapse_probability_diff: Decimal,
    pub credit_score_diff: Decimal,
    pub nav_diff: Money,
    pub liquidity_ratio_diff: Decimal,
    pub shock_resilience_index_diff: Decimal,
    pub vibe_state_change: StateChange<VibeState>,
    pub pet_state_change: StateChange<PetState>,
}

/// Branch comparison: both runs plus the deltas between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchComparison {
    pub baseline: SimulationOutput,
    pub branch: SimulationOutput,
    pub branch_at_day: u32,
    pub deltas: BranchDeltas,
}

/// Pure delta computation over two completed runs.
pub fn compare_branches(
    baseline: SimulationOutput,
    branch: SimulationOutput,
    branch_at_day: u32,
) -> BranchComparison {
    let deltas = BranchDeltas {
        final_balance_diff: branch.final_balance.expected - baseline.final_balance.expected,
        collapse_probability_diff: branch.collapse_probability - baseline.collapse_probability,
        credit_score_diff: branch.final_credit_score - baseline.final_credit_score,
        nav_diff: branch.final_nav - baseline.final_nav,
        liquidity_ratio_diff: branch.final_liquidity_ratio - baseline.final_liquidity_ratio,
        shock_resilience_index_diff: branch.shock_resilience_index
            - baseline.shock_resilience_index,
        vibe_state_change: StateChange {
            from: baseline.vibe_state,
            to: branch.vibe_state,
        },
        pet_state_change: StateChange {
            from: baseline.pet_state,
            to: branch.pet_state,
        },
    };
    BranchComparison {
        baseline,
        branch,
        branch_at_day,
        deltas,
    }
}
