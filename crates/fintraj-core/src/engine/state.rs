//! Mutable working memory for one simulation run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::EngineConfig;
use crate::types::{
    Asset, AssetKind, DailySnapshot, Expense, IncomeStream, Liability, Money, SimulationInput,
    TaxConfig, VibeState,
};

/// Hard band the credit score evolves inside.
pub const CREDIT_SCORE_FLOOR: Decimal = dec!(300);
pub const CREDIT_SCORE_CEILING: Decimal = dec!(850);

/// Liquidity ratio reported when there is no debt but liquid assets exist.
const UNLEVERED_LIQUIDITY_RATIO: Decimal = dec!(999);

/// The single mutable cell a run advances day by day.
///
/// Built from deep clones of the caller's input, so the input is unchanged
/// on return. Created at run start, mutated exactly `horizonDays` times,
/// dropped at run end.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub day: u32,
    pub balance: Money,
    pub base_currency: String,
    pub income_streams: Vec<IncomeStream>,
    pub expenses: Vec<Expense>,
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
    pub tax_config: Option<TaxConfig>,

    pub credit_score: Decimal,
    pub total_realized_gains: Money,
    pub daily_realized_gains: Money,
    pub cumulative_annual_income: Money,

    pub shock_count: u32,
    pub recovery_days: u32,
    pub consecutive_deficit_days: u32,
    /// First day of a deficit that outlasted 30 days; never cleared once set.
    pub collapse_day: Option<u32>,

    // Per-day accumulators, reset at the top of each day.
    pub daily_income: Money,
    pub daily_expenses: Money,
    pub daily_income_tax: Money,
    pub daily_capital_gains_tax: Money,
}

impl SimulationState {
    pub fn new(input: &SimulationInput, config: &EngineConfig) -> Self {
        Self {
            day: 0,
            balance: input.initial_balance,
            base_currency: input.base_currency.clone(),
            income_streams: input.income_streams.clone(),
            expenses: input.expenses.clone(),
            assets: input.assets.clone(),
            liabilities: input.liabilities.clone(),
            tax_config: input.tax_config.clone(),
            credit_score: config.initial_credit_score,
            total_realized_gains: Decimal::ZERO,
            daily_realized_gains: Decimal::ZERO,
            cumulative_annual_income: Decimal::ZERO,
            shock_count: 0,
            recovery_days: 0,
            consecutive_deficit_days: 0,
            collapse_day: None,
            daily_income: Decimal::ZERO,
            daily_expenses: Decimal::ZERO,
            daily_income_tax: Decimal::ZERO,
            daily_capital_gains_tax: Decimal::ZERO,
        }
    }

    pub fn begin_day(&mut self, day: u32) {
        self.day = day;
        self.daily_realized_gains = Decimal::ZERO;
        self.daily_income = Decimal::ZERO;
        self.daily_expenses = Decimal::ZERO;
        self.daily_income_tax = Decimal::ZERO;
        self.daily_capital_gains_tax = Decimal::ZERO;
    }

    /// Sum of asset book values, in each asset's own currency.
    pub fn asset_nav(&self) -> Money {
        self.assets.iter().map(|a| a.value).sum()
    }

    pub fn total_debt(&self) -> Money {
        self.liabilities.iter().map(|l| l.principal).sum()
    }

    fn liquid_unlocked(&self) -> Money {
        self.assets
            .iter()
            .filter(|a| a.kind == AssetKind::Liquid && !a.locked)
            .map(|a| a.value)
            .sum()
    }

    pub fn liquidity_ratio(&self) -> Decimal {
        let debt = self.total_debt();
        let liquid = self.liquid_unlocked();
        if debt > Decimal::ZERO {
            liquid / debt
        } else if liquid > Decimal::ZERO {
            UNLEVERED_LIQUIDITY_RATIO
        } else {
            Decimal::ZERO
        }
    }

    pub fn shock_resilience_index(&self) -> Decimal {
        let raw = dec!(100) - dec!(10) * Decimal::from(self.shock_count)
            + dec!(2) * Decimal::from(self.recovery_days);
        raw.clamp(Decimal::ZERO, dec!(100))
    }

    /// End-of-day reading of the state.
    pub fn snapshot(&self, date: NaiveDate) -> DailySnapshot {
        DailySnapshot {
            day: self.day,
            date,
            balance: self.balance,
            total_income: self.daily_income,
            total_expenses: self.daily_expenses,
            net_cash_flow: self.daily_income - self.daily_expenses,
            asset_nav: self.asset_nav(),
            total_debt: self.total_debt(),
            credit_score: self.credit_score,
            liquidity_ratio: self.liquidity_ratio(),
            shock_resilience_index: self.shock_resilience_index(),
            tax_paid: self.daily_income_tax,
            capital_gains_tax: self.daily_capital_gains_tax,
        }
    }

    /// Qualitative label for the run's end state.
    pub fn vibe_state(&self) -> VibeState {
        if self.balance < Decimal::ZERO && self.consecutive_deficit_days > 30 {
            VibeState::Collapsed
        } else if self.balance < Decimal::ZERO {
            VibeState::Critical
        } else if self.consecutive_deficit_days > 7 {
            VibeState::Strained
        } else if self.credit_score > dec!(700) && self.balance > Decimal::ZERO {
            VibeState::Thriving
        } else {
            VibeState::Stable
        }
    }
}
