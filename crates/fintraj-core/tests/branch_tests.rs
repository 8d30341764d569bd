use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use fintraj_core::engine::branch::{compare_branches, simulate_branch, SimulationPatch};
use fintraj_core::types::{Expense, IncomeStream, Recurrence, SimulationInput};

fn income(amount: Decimal, recurrence: Recurrence) -> IncomeStream {
    IncomeStream {
        id: Uuid::new_v4(),
        name: "salary".to_string(),
        amount,
        currency: "USD".to_string(),
        recurrence,
        start_day: 0,
        end_day: None,
    }
}

fn expense(name: &str, amount: Decimal, essential: bool) -> Expense {
    Expense {
        id: Uuid::new_v4(),
        name: name.to_string(),
        amount,
        currency: "USD".to_string(),
        recurrence: Recurrence::Daily,
        start_day: 0,
        end_day: None,
        essential,
    }
}

fn neutral_input() -> SimulationInput {
    // Income exactly offsets expenses, so the balance never moves.
    SimulationInput {
        seed: 42,
        horizon_days: 60,
        base_currency: "USD".to_string(),
        initial_balance: dec!(10000),
        income_streams: vec![income(dec!(100), Recurrence::Daily)],
        expenses: vec![expense("living", dec!(100), true)],
        assets: vec![],
        liabilities: vec![],
        exchange_rates: vec![],
        tax_config: None,
        monte_carlo_config: None,
    }
}

#[test]
fn test_zero_change_branch_at_day_zero_has_zero_deltas() {
    let base = neutral_input();
    let result = simulate_branch(&base, 0, &SimulationPatch::default()).unwrap();
    let comparison = compare_branches(result.baseline, result.branch, 0);

    assert_eq!(comparison.deltas.final_balance_diff, Decimal::ZERO);
    assert_eq!(comparison.deltas.collapse_probability_diff, Decimal::ZERO);
    assert_eq!(comparison.deltas.credit_score_diff, Decimal::ZERO);
    assert_eq!(comparison.deltas.nav_diff, Decimal::ZERO);
    assert_eq!(comparison.deltas.liquidity_ratio_diff, Decimal::ZERO);
    assert_eq!(comparison.deltas.shock_resilience_index_diff, Decimal::ZERO);
    assert_eq!(
        comparison.deltas.vibe_state_change.from,
        comparison.deltas.vibe_state_change.to
    );
    assert_eq!(
        comparison.deltas.pet_state_change.from,
        comparison.deltas.pet_state_change.to
    );
}

#[test]
fn test_branch_and_compare_share_the_same_baseline() {
    let base = neutral_input();
    let first = simulate_branch(&base, 15, &SimulationPatch::default()).unwrap();
    let second = simulate_branch(&base, 15, &SimulationPatch::default()).unwrap();
    // computedAt differs; every simulated field agrees.
    assert_eq!(first.baseline.snapshots, second.baseline.snapshots);
    assert_eq!(first.baseline.final_balance, second.baseline.final_balance);
    assert_eq!(first.baseline.vibe_state, second.baseline.vibe_state);
}

#[test]
fn test_removing_nonessential_expenses_never_hurts() {
    let mut base = neutral_input();
    base.expenses.push(expense("dining", dec!(40), false));
    base.expenses.push(expense("streaming", dec!(15), false));

    let essentials_only: Vec<Expense> = base
        .expenses
        .iter()
        .filter(|e| e.essential)
        .cloned()
        .collect();
    let patch = SimulationPatch {
        expenses: Some(essentials_only),
        ..Default::default()
    };

    let result = simulate_branch(&base, 10, &patch).unwrap();
    assert!(
        result.branch.final_balance.expected >= result.baseline.final_balance.expected,
        "branch {} < baseline {}",
        result.branch.final_balance.expected,
        result.baseline.final_balance.expected
    );
}

#[test]
fn test_extra_income_branch_improves_final_balance() {
    let base = neutral_input();
    let mut boosted = base.income_streams.clone();
    boosted.push(income(dec!(50), Recurrence::Daily));
    let patch = SimulationPatch {
        income_streams: Some(boosted),
        ..Default::default()
    };

    let result = simulate_branch(&base, 30, &patch).unwrap();
    let comparison = compare_branches(result.baseline, result.branch, 30);
    // 30 remaining days at +50/day.
    assert_eq!(comparison.deltas.final_balance_diff, dec!(1500));
}

#[test]
fn test_delta_identity_for_every_metric() {
    let mut base = neutral_input();
    base.expenses.push(expense("dining", dec!(40), false));
    let patch = SimulationPatch {
        expenses: Some(vec![expense("living", dec!(100), true)]),
        ..Default::default()
    };

    let result = simulate_branch(&base, 5, &patch).unwrap();
    let comparison = compare_branches(result.baseline.clone(), result.branch.clone(), 5);

    assert_eq!(
        comparison.deltas.final_balance_diff,
        result.branch.final_balance.expected - result.baseline.final_balance.expected
    );
    assert_eq!(
        comparison.deltas.collapse_probability_diff,
        result.branch.collapse_probability - result.baseline.collapse_probability
    );
    assert_eq!(
        comparison.deltas.credit_score_diff,
        result.branch.final_credit_score - result.baseline.final_credit_score
    );
    assert_eq!(
        comparison.deltas.nav_diff,
        result.branch.final_nav - result.baseline.final_nav
    );
    assert_eq!(
        comparison.deltas.liquidity_ratio_diff,
        result.branch.final_liquidity_ratio - result.baseline.final_liquidity_ratio
    );
    assert_eq!(
        comparison.deltas.shock_resilience_index_diff,
        result.branch.shock_resilience_index - result.baseline.shock_resilience_index
    );
    assert_eq!(comparison.branch_at_day, 5);
}

#[test]
fn test_branch_seed_patch_changes_branch_only() {
    let base = neutral_input();
    let patch = SimulationPatch {
        seed: Some(1234),
        ..Default::default()
    };
    let result = simulate_branch(&base, 10, &patch).unwrap();
    assert_eq!(result.baseline.seed, 42);
    assert_eq!(result.branch.seed, 1234);
}
