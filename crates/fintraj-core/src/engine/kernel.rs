//! Per-day transition: eight coupled components run in dependency order.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::state::{SimulationState, CREDIT_SCORE_CEILING, CREDIT_SCORE_FLOOR};
use crate::dag::{self, DagNode};
use crate::error::FinTrajError;
use crate::fx::FxEngine;
use crate::rng::SimRng;
use crate::tax;
use crate::types::{AssetKind, Recurrence};
use crate::FinTrajResult;

const DAYS_PER_YEAR: f64 = 365.0;
/// A deficit older than this marks the run as collapsed.
const COLLAPSE_THRESHOLD_DAYS: u32 = 30;

/// The eight components of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayComponent {
    Income,
    Expenses,
    Liabilities,
    AssetValuation,
    AutoLiquidation,
    Taxation,
    CreditScore,
    Behavioral,
}

impl DayComponent {
    pub fn id(self) -> &'static str {
        match self {
            DayComponent::Income => "income",
            DayComponent::Expenses => "expenses",
            DayComponent::Liabilities => "liabilities",
            DayComponent::AssetValuation => "asset_valuation",
            DayComponent::AutoLiquidation => "auto_liquidation",
            DayComponent::Taxation => "taxation",
            DayComponent::CreditScore => "credit_score",
            DayComponent::Behavioral => "behavioral",
        }
    }

    fn from_id(id: &str) -> Option<Self> {
        match id {
            "income" => Some(DayComponent::Income),
            "expenses" => Some(DayComponent::Expenses),
            "liabilities" => Some(DayComponent::Liabilities),
            "asset_valuation" => Some(DayComponent::AssetValuation),
            "auto_liquidation" => Some(DayComponent::AutoLiquidation),
            "taxation" => Some(DayComponent::Taxation),
            "credit_score" => Some(DayComponent::CreditScore),
            "behavioral" => Some(DayComponent::Behavioral),
            _ => None,
        }
    }

    /// The fixed dependency graph for one simulated day.
    pub fn graph() -> Vec<DagNode> {
        fn node(component: DayComponent, deps: &[DayComponent]) -> DagNode {
            DagNode {
                id: component.id().to_string(),
                depends_on: deps.iter().map(|d| d.id().to_string()).collect(),
            }
        }
        vec![
            node(DayComponent::Income, &[]),
            node(DayComponent::Expenses, &[DayComponent::Income]),
            node(DayComponent::Liabilities, &[DayComponent::Expenses]),
            node(DayComponent::AssetValuation, &[]),
            node(
                DayComponent::AutoLiquidation,
                &[DayComponent::Expenses, DayComponent::Liabilities],
            ),
            node(
                DayComponent::Taxation,
                &[DayComponent::Income, DayComponent::AutoLiquidation],
            ),
            node(
                DayComponent::CreditScore,
                &[
                    DayComponent::Liabilities,
                    DayComponent::AutoLiquidation,
                    DayComponent::Taxation,
                ],
            ),
            node(DayComponent::Behavioral, &[DayComponent::CreditScore]),
        ]
    }

    /// Resolve the execution order; callers hoist this out of the day loop.
    pub fn execution_order() -> FinTrajResult<Vec<DayComponent>> {
        dag::resolve(&Self::graph())?
            .iter()
            .map(|id| {
                Self::from_id(id).ok_or_else(|| FinTrajError::UnknownDependency(id.clone()))
            })
            .collect()
    }
}

/// Does an event with this recurrence fire `elapsed` days after its start?
/// Monthly is modulo-30 by design, not calendar months; existing outputs
/// depend on that approximation.
pub fn is_recurrence_day(elapsed: i64, recurrence: Recurrence) -> bool {
    if elapsed < 0 {
        return false;
    }
    match recurrence {
        Recurrence::Daily => true,
        Recurrence::Weekly => elapsed % 7 == 0,
        Recurrence::Biweekly => elapsed % 14 == 0,
        Recurrence::Monthly => elapsed % 30 == 0,
        Recurrence::Yearly => elapsed % 365 == 0,
        Recurrence::Once => elapsed == 0,
    }
}

fn event_fires(day: u32, start_day: u32, end_day: Option<u32>, recurrence: Recurrence) -> bool {
    if let Some(end) = end_day {
        if day > end {
            return false;
        }
    }
    is_recurrence_day(day as i64 - start_day as i64, recurrence)
}

/// Advance the state by one day, executing every component in `order`.
pub fn run_day(
    state: &mut SimulationState,
    fx: &mut FxEngine,
    rng: &mut SimRng,
    order: &[DayComponent],
    day: u32,
) -> FinTrajResult<()> {
    state.begin_day(day);
    for component in order {
        match component {
            DayComponent::Income => apply_income(state, fx, rng)?,
            DayComponent::Expenses => apply_expenses(state, fx, rng)?,
            DayComponent::Liabilities => apply_liabilities(state, fx, rng)?,
            DayComponent::AssetValuation => apply_asset_valuation(state, rng)?,
            DayComponent::AutoLiquidation => apply_auto_liquidation(state, fx, rng)?,
            DayComponent::Taxation => apply_taxation(state),
            DayComponent::CreditScore => apply_credit_score(state),
            DayComponent::Behavioral => apply_behavioral(state),
        }
    }
    Ok(())
}

fn apply_income(
    state: &mut SimulationState,
    fx: &mut FxEngine,
    rng: &mut SimRng,
) -> FinTrajResult<()> {
    let day = state.day;
    for stream in &state.income_streams {
        if !event_fires(day, stream.start_day, stream.end_day, stream.recurrence) {
            continue;
        }
        let amount = fx.convert(
            stream.amount,
            &stream.currency,
            &state.base_currency,
            day,
            rng,
            &format!("income:{}", stream.name),
        )?;
        state.balance += amount;
        state.daily_income += amount;
    }
    Ok(())
}

fn apply_expenses(
    state: &mut SimulationState,
    fx: &mut FxEngine,
    rng: &mut SimRng,
) -> FinTrajResult<()> {
    let day = state.day;
    // The essential flag is deliberately not consulted here; see Expense.
    for expense in &state.expenses {
        if !event_fires(day, expense.start_day, expense.end_day, expense.recurrence) {
            continue;
        }
        let amount = fx.convert(
            expense.amount,
            &expense.currency,
            &state.base_currency,
            day,
            rng,
            &format!("expense:{}", expense.name),
        )?;
        state.balance -= amount;
        state.daily_expenses += amount;
    }
    Ok(())
}

fn apply_liabilities(
    state: &mut SimulationState,
    fx: &mut FxEngine,
    rng: &mut SimRng,
) -> FinTrajResult<()> {
    let day = state.day;
    let base_currency = state.base_currency.clone();
    for liability in &mut state.liabilities {
        if liability.principal <= Decimal::ZERO {
            continue;
        }
        liability.principal *= Decimal::ONE + liability.interest_rate / dec!(365);
        let daily_payment = (liability.minimum_payment / dec!(30)).min(liability.principal);
        let paid = fx.convert(
            daily_payment,
            &liability.currency,
            &base_currency,
            day,
            rng,
            &format!("liability:{}", liability.name),
        )?;
        state.balance -= paid;
        // Principal is reduced by the pre-conversion payment amount.
        liability.principal -= daily_payment;
    }
    Ok(())
}

fn apply_asset_valuation(state: &mut SimulationState, rng: &mut SimRng) -> FinTrajResult<()> {
    let day = state.day;
    for asset in &mut state.assets {
        if asset.volatility > 0.0 {
            let shock = rng.gaussian(0.0, asset.volatility / DAYS_PER_YEAR.sqrt());
            let factor = Decimal::from_f64(1.0 + shock).ok_or_else(|| FinTrajError::NonFinite {
                context: format!("drift factor for asset '{}'", asset.name),
            })?;
            asset.value = (asset.value * factor).max(Decimal::ZERO);
        }
        if asset.yield_rate > Decimal::ZERO && !asset.locked {
            asset.value *= Decimal::ONE + asset.yield_rate / dec!(365);
        }
        if asset.locked {
            if let Some(unlock_day) = asset.lock_until_day {
                if day >= unlock_day {
                    asset.locked = false;
                }
            }
        }
    }
    Ok(())
}

/// Sell assets to cover a negative balance.
///
/// Tiers are strict: liquid before volatile before yield-generating, and
/// illiquid assets never sell. Within a tier, cheapest liquidation penalty
/// first, insertion order on ties. Selling stops the moment the balance is
/// non-negative; a sold asset's value drops to zero.
fn apply_auto_liquidation(
    state: &mut SimulationState,
    fx: &mut FxEngine,
    rng: &mut SimRng,
) -> FinTrajResult<()> {
    if state.balance >= Decimal::ZERO {
        return Ok(());
    }
    let day = state.day;
    let base_currency = state.base_currency.clone();
    for tier in [AssetKind::Liquid, AssetKind::Volatile, AssetKind::YieldGenerating] {
        let mut candidates: Vec<usize> = (0..state.assets.len())
            .filter(|&i| {
                let a = &state.assets[i];
                a.kind == tier && !a.locked && a.value > Decimal::ZERO
            })
            .collect();
        candidates.sort_by(|&a, &b| {
            state.assets[a]
                .liquidation_penalty
                .cmp(&state.assets[b].liquidation_penalty)
        });

        for i in candidates {
            if state.balance >= Decimal::ZERO {
                return Ok(());
            }
            let (value, penalty, currency, name) = {
                let a = &state.assets[i];
                (a.value, a.liquidation_penalty, a.currency.clone(), a.name.clone())
            };
            let proceeds = value * (Decimal::ONE - penalty);
            let credited = fx.convert(
                proceeds,
                &currency,
                &base_currency,
                day,
                rng,
                &format!("liquidation:{name}"),
            )?;
            state.balance += credited;
            state.daily_realized_gains += credited;
            state.total_realized_gains += credited;
            state.assets[i].value = Decimal::ZERO;
        }
    }
    Ok(())
}

fn apply_taxation(state: &mut SimulationState) {
    if let Some(config) = &state.tax_config {
        let daily = tax::compute_daily_tax(
            state.daily_income,
            state.daily_realized_gains,
            state.cumulative_annual_income,
            config,
        );
        state.balance -= daily.total_tax;
        state.daily_income_tax = daily.income_tax;
        state.daily_capital_gains_tax = daily.capital_gains_tax;
    }
    state.cumulative_annual_income += state.daily_income;
    if state.day > 0 && state.day % 365 == 0 {
        state.cumulative_annual_income = Decimal::ZERO;
    }
}

fn apply_credit_score(state: &mut SimulationState) {
    let total_debt = state.total_debt();
    let debt_ratio = if state.balance > Decimal::ZERO {
        total_debt / state.balance
    } else if total_debt > Decimal::ZERO {
        dec!(2)
    } else {
        Decimal::ZERO
    };
    let punctuality = if state.consecutive_deficit_days == 0 {
        Decimal::ONE
    } else {
        dec!(-1)
    };
    let adjustment = (dec!(-0.5) * debt_ratio + dec!(0.3) * punctuality) * dec!(0.1);
    state.credit_score =
        (state.credit_score + adjustment).clamp(CREDIT_SCORE_FLOOR, CREDIT_SCORE_CEILING);
}

fn apply_behavioral(state: &mut SimulationState) {
    if state.balance < Decimal::ZERO {
        state.consecutive_deficit_days += 1;
        if state.consecutive_deficit_days == 1 {
            state.shock_count += 1;
        }
        if state.collapse_day.is_none()
            && state.consecutive_deficit_days > COLLAPSE_THRESHOLD_DAYS
        {
            state.collapse_day = Some(state.day);
        }
    } else if state.consecutive_deficit_days > 0 {
        state.recovery_days += 1;
        state.consecutive_deficit_days = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::types::{Asset, Expense, IncomeStream, Liability, SimulationInput};
    use uuid::Uuid;

    fn base_input() -> SimulationInput {
        SimulationInput {
            seed: 42,
            horizon_days: 30,
            base_currency: "USD".to_string(),
            initial_balance: dec!(10000),
            income_streams: vec![],
            expenses: vec![],
            assets: vec![],
            liabilities: vec![],
            exchange_rates: vec![],
            tax_config: None,
            monte_carlo_config: None,
        }
    }

    fn income(amount: Decimal, recurrence: Recurrence, start_day: u32) -> IncomeStream {
        IncomeStream {
            id: Uuid::new_v4(),
            name: "salary".to_string(),
            amount,
            currency: "USD".to_string(),
            recurrence,
            start_day,
            end_day: None,
        }
    }

    fn expense(amount: Decimal, recurrence: Recurrence) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            name: "rent".to_string(),
            amount,
            currency: "USD".to_string(),
            recurrence,
            start_day: 0,
            end_day: None,
            essential: true,
        }
    }

    fn liquidatable(
        kind: AssetKind,
        value: Decimal,
        penalty: Decimal,
        locked: bool,
    ) -> Asset {
        Asset {
            id: Uuid::new_v4(),
            name: format!("{kind:?}"),
            kind,
            value,
            currency: "USD".to_string(),
            volatility: 0.0,
            yield_rate: Decimal::ZERO,
            liquidation_penalty: penalty,
            locked,
            lock_until_day: None,
        }
    }

    fn step(input: &SimulationInput, days: u32) -> SimulationState {
        let mut state = SimulationState::new(input, &EngineConfig::default());
        let mut fx = FxEngine::new(&input.exchange_rates);
        let mut rng = SimRng::new(input.seed);
        let order = DayComponent::execution_order().unwrap();
        for day in 0..days {
            run_day(&mut state, &mut fx, &mut rng, &order, day).unwrap();
        }
        state
    }

    #[test]
    fn test_execution_order_is_fixed() {
        let order = DayComponent::execution_order().unwrap();
        assert_eq!(
            order,
            vec![
                DayComponent::AssetValuation,
                DayComponent::Income,
                DayComponent::Expenses,
                DayComponent::Liabilities,
                DayComponent::AutoLiquidation,
                DayComponent::Taxation,
                DayComponent::CreditScore,
                DayComponent::Behavioral,
            ]
        );
    }

    #[test]
    fn test_recurrence_predicate() {
        assert!(is_recurrence_day(0, Recurrence::Daily));
        assert!(is_recurrence_day(5, Recurrence::Daily));
        assert!(is_recurrence_day(14, Recurrence::Weekly));
        assert!(!is_recurrence_day(13, Recurrence::Weekly));
        assert!(is_recurrence_day(28, Recurrence::Biweekly));
        assert!(!is_recurrence_day(21, Recurrence::Biweekly));
        assert!(is_recurrence_day(60, Recurrence::Monthly));
        assert!(!is_recurrence_day(31, Recurrence::Monthly));
        assert!(is_recurrence_day(730, Recurrence::Yearly));
        assert!(is_recurrence_day(0, Recurrence::Once));
        assert!(!is_recurrence_day(1, Recurrence::Once));
        assert!(!is_recurrence_day(-3, Recurrence::Daily));
    }

    #[test]
    fn test_income_respects_start_and_end_day() {
        let mut input = base_input();
        let mut stream = income(dec!(100), Recurrence::Daily, 2);
        stream.end_day = Some(3);
        input.income_streams.push(stream);
        let state = step(&input, 10);
        // Fires on days 2 and 3 only.
        assert_eq!(state.balance, dec!(10200));
    }

    #[test]
    fn test_monthly_events_fire_on_day_zero() {
        let mut input = base_input();
        input.income_streams.push(income(dec!(3000), Recurrence::Monthly, 0));
        input.expenses.push(expense(dec!(1500), Recurrence::Monthly));
        input.expenses.push(expense(dec!(30), Recurrence::Daily));
        let state = step(&input, 1);
        assert_eq!(state.daily_income, dec!(3000));
        assert_eq!(state.daily_expenses, dec!(1530));
        assert_eq!(state.balance, dec!(10000) + dec!(3000) - dec!(1530));
    }

    #[test]
    fn test_liability_accrues_interest_then_pays() {
        let mut input = base_input();
        input.liabilities.push(Liability {
            id: Uuid::new_v4(),
            name: "loan".to_string(),
            principal: dec!(36500),
            interest_rate: dec!(0.365),
            currency: "USD".to_string(),
            minimum_payment: dec!(300),
            remaining_term_days: 365,
        });
        let state = step(&input, 1);
        // 36500 * (1 + 0.001) = 36536.5, minus a 10/day payment.
        assert_eq!(state.liabilities[0].principal, dec!(36526.5));
        assert_eq!(state.balance, dec!(9990));
    }

    #[test]
    fn test_liability_payment_capped_at_principal() {
        let mut input = base_input();
        input.liabilities.push(Liability {
            id: Uuid::new_v4(),
            name: "stub".to_string(),
            principal: dec!(2),
            interest_rate: Decimal::ZERO,
            currency: "USD".to_string(),
            minimum_payment: dec!(3000),
            remaining_term_days: 10,
        });
        let state = step(&input, 1);
        assert_eq!(state.liabilities[0].principal, Decimal::ZERO);
        assert_eq!(state.balance, dec!(9998));
    }

    #[test]
    fn test_yield_accrues_daily_and_skips_locked() {
        let mut input = base_input();
        let mut earning = liquidatable(AssetKind::YieldGenerating, dec!(36500), Decimal::ZERO, false);
        earning.yield_rate = dec!(0.0365);
        let mut frozen = earning.clone();
        frozen.locked = true;
        frozen.lock_until_day = Some(100);
        input.assets.push(earning);
        input.assets.push(frozen);
        let state = step(&input, 1);
        assert_eq!(state.assets[0].value, dec!(36503.65));
        assert_eq!(state.assets[1].value, dec!(36500));
    }

    #[test]
    fn test_lock_expires_on_lock_until_day() {
        let mut input = base_input();
        let mut asset = liquidatable(AssetKind::Liquid, dec!(100), Decimal::ZERO, true);
        asset.lock_until_day = Some(2);
        input.assets.push(asset);
        let state = step(&input, 2);
        assert!(state.assets[0].locked, "still locked after day 1");
        let state = step(&input, 3);
        assert!(!state.assets[0].locked, "unlocked on day 2");
    }

    #[test]
    fn test_liquidation_covers_deficit_exactly() {
        let mut input = base_input();
        input.initial_balance = dec!(-100);
        input
            .assets
            .push(liquidatable(AssetKind::Liquid, dec!(200), dec!(0.5), false));
        let state = step(&input, 1);
        assert_eq!(state.balance, Decimal::ZERO);
        assert_eq!(state.assets[0].value, Decimal::ZERO);
        assert_eq!(state.daily_realized_gains, dec!(100));
        assert_eq!(state.total_realized_gains, dec!(100));
    }

    #[test]
    fn test_locked_assets_never_liquidate() {
        let mut input = base_input();
        input.initial_balance = dec!(-100);
        input
            .assets
            .push(liquidatable(AssetKind::Liquid, dec!(100000), Decimal::ZERO, true));
        let state = step(&input, 1);
        assert_eq!(state.balance, dec!(-100));
        assert_eq!(state.assets[0].value, dec!(100000));
    }

    #[test]
    fn test_illiquid_assets_never_liquidate() {
        let mut input = base_input();
        input.initial_balance = dec!(-100);
        input
            .assets
            .push(liquidatable(AssetKind::Illiquid, dec!(100000), Decimal::ZERO, false));
        let state = step(&input, 1);
        assert_eq!(state.balance, dec!(-100));
    }

    #[test]
    fn test_liquidation_tier_priority() {
        let mut input = base_input();
        input.initial_balance = dec!(-50);
        input
            .assets
            .push(liquidatable(AssetKind::Volatile, dec!(1000), Decimal::ZERO, false));
        input
            .assets
            .push(liquidatable(AssetKind::Liquid, dec!(1000), dec!(0.9), false));
        let state = step(&input, 1);
        // Liquid sells first despite its worse penalty.
        assert_eq!(state.assets[1].value, Decimal::ZERO);
        assert_eq!(state.assets[0].value, dec!(1000));
    }

    #[test]
    fn test_liquidation_sorts_by_penalty_within_tier() {
        let mut input = base_input();
        input.initial_balance = dec!(-10);
        input
            .assets
            .push(liquidatable(AssetKind::Liquid, dec!(1000), dec!(0.4), false));
        input
            .assets
            .push(liquidatable(AssetKind::Liquid, dec!(1000), dec!(0.1), false));
        let state = step(&input, 1);
        // The cheaper-to-sell asset goes first and already covers the hole.
        assert_eq!(state.assets[1].value, Decimal::ZERO);
        assert_eq!(state.assets[0].value, dec!(1000));
    }

    #[test]
    fn test_liquidation_penalty_ties_break_on_insertion_order() {
        let mut input = base_input();
        input.initial_balance = dec!(-10);
        input
            .assets
            .push(liquidatable(AssetKind::Liquid, dec!(500), dec!(0.2), false));
        input
            .assets
            .push(liquidatable(AssetKind::Liquid, dec!(500), dec!(0.2), false));
        let state = step(&input, 1);
        assert_eq!(state.assets[0].value, Decimal::ZERO);
        assert_eq!(state.assets[1].value, dec!(500));
    }

    #[test]
    fn test_taxation_deducts_from_balance_not_cash_flow() {
        let mut input = base_input();
        input.income_streams.push(income(dec!(100), Recurrence::Daily, 0));
        input.tax_config = Some(crate::types::TaxConfig {
            brackets: vec![crate::types::TaxBracket {
                upper_bound: dec!(100000),
                rate: dec!(0.10),
            }],
            capital_gains_rate: dec!(0.15),
            currency: "USD".to_string(),
        });
        let state = step(&input, 1);
        assert_eq!(state.daily_income_tax, dec!(10.00));
        assert_eq!(state.balance, dec!(10090.00));
        assert_eq!(state.cumulative_annual_income, dec!(100));
    }

    #[test]
    fn test_annual_income_resets_every_365_days() {
        let mut input = base_input();
        input.income_streams.push(income(dec!(100), Recurrence::Daily, 0));
        let state = step(&input, 365);
        assert_eq!(state.cumulative_annual_income, dec!(36500));
        let state = step(&input, 366);
        // Day 365 adds its income and then the yearly reset wipes it.
        assert_eq!(state.cumulative_annual_income, Decimal::ZERO);
    }

    #[test]
    fn test_credit_score_drifts_up_when_healthy() {
        let input = base_input();
        let state = step(&input, 10);
        assert_eq!(state.credit_score, dec!(650) + dec!(0.03) * dec!(10));
    }

    #[test]
    fn test_credit_score_falls_with_debt_and_deficit() {
        let mut input = base_input();
        input.initial_balance = dec!(-500);
        input.liabilities.push(Liability {
            id: Uuid::new_v4(),
            name: "card".to_string(),
            principal: dec!(5000),
            interest_rate: Decimal::ZERO,
            currency: "USD".to_string(),
            minimum_payment: Decimal::ZERO,
            remaining_term_days: 100,
        });
        let state = step(&input, 1);
        // Deficit balance pins the debt ratio at 2. Day 0 still counts as
        // punctual because the deficit streak is recorded afterwards.
        assert_eq!(state.credit_score, dec!(650) + (dec!(-1.0) + dec!(0.3)) * dec!(0.1));
        let state = step(&input, 2);
        assert_eq!(
            state.credit_score,
            dec!(650) + (dec!(-1.0) + dec!(0.3)) * dec!(0.1) + (dec!(-1.0) - dec!(0.3)) * dec!(0.1)
        );
    }

    #[test]
    fn test_shock_counted_once_per_deficit_run() {
        let mut input = base_input();
        input.initial_balance = dec!(-1);
        let state = step(&input, 5);
        assert_eq!(state.shock_count, 1);
        assert_eq!(state.consecutive_deficit_days, 5);
    }

    #[test]
    fn test_recovery_resets_deficit_streak() {
        let mut input = base_input();
        input.initial_balance = dec!(-50);
        // A single inflow on day 2 pulls the balance positive for good.
        input.income_streams.push(income(dec!(1000), Recurrence::Once, 2));
        let state = step(&input, 4);
        assert_eq!(state.shock_count, 1);
        assert_eq!(state.consecutive_deficit_days, 0);
        assert_eq!(state.recovery_days, 1);
    }

    #[test]
    fn test_collapse_day_set_after_31_deficit_days() {
        let mut input = base_input();
        input.initial_balance = dec!(-100);
        let state = step(&input, 60);
        assert_eq!(state.collapse_day, Some(30));
        assert_eq!(state.consecutive_deficit_days, 60);
    }

    #[test]
    fn test_collapse_day_never_moves_once_set() {
        let mut input = base_input();
        input.initial_balance = dec!(-100);
        // Recover briefly at day 40, then fall back into deficit.
        input.income_streams.push(income(dec!(200), Recurrence::Once, 40));
        input.expenses.push(Expense {
            id: Uuid::new_v4(),
            name: "drain".to_string(),
            amount: dec!(200),
            currency: "USD".to_string(),
            recurrence: Recurrence::Once,
            start_day: 45,
            end_day: None,
            essential: false,
        });
        let state = step(&input, 90);
        assert_eq!(state.collapse_day, Some(30));
    }
}
