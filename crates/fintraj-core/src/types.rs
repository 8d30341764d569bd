use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Uppercase 3-letter currency code (e.g. "USD").
pub type CurrencyCode = String;

fn default_seed() -> u64 {
    42
}

fn default_capital_gains_rate() -> Rate {
    dec!(0.15)
}

// ---------------------------------------------------------------------------
// Input model
// ---------------------------------------------------------------------------

/// Cadence of a recurring cash-flow event, measured in elapsed days from the
/// event's start day. Monthly is modulo-30, not calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
    Once,
}

/// Asset class, which drives volatility, yield, and liquidation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Liquid,
    Illiquid,
    YieldGenerating,
    Volatile,
}

/// A recurring inflow of money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStream {
    pub id: Uuid,
    pub name: String,
    pub amount: Money,
    pub currency: CurrencyCode,
    pub recurrence: Recurrence,
    pub start_day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_day: Option<u32>,
}

/// A recurring outflow of money.
///
/// `essential` is carried through but has no effect on the daily transition;
/// it is reserved for a skip-when-cash-is-low policy that is not specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub amount: Money,
    pub currency: CurrencyCode,
    pub recurrence: Recurrence,
    pub start_day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_day: Option<u32>,
    pub essential: bool,
}

/// A holding with a book value that evolves daily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub value: Money,
    pub currency: CurrencyCode,
    /// Annualised volatility in [0, 1]; 0 disables the daily shock.
    #[serde(default)]
    pub volatility: f64,
    #[serde(default)]
    pub yield_rate: Rate,
    /// Fraction of value lost when force-liquidated, in [0, 1].
    #[serde(default)]
    pub liquidation_penalty: Rate,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_until_day: Option<u32>,
}

/// An outstanding debt with daily interest accrual and minimum payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: Uuid,
    pub name: String,
    pub principal: Money,
    pub interest_rate: Rate,
    pub currency: CurrencyCode,
    pub minimum_payment: Money,
    pub remaining_term_days: u32,
}

/// One progressive tax bracket: income up to `upper_bound` above the
/// previous bracket is taxed at `rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    pub upper_bound: Money,
    pub rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    pub brackets: Vec<TaxBracket>,
    #[serde(default = "default_capital_gains_rate")]
    pub capital_gains_rate: Rate,
    pub currency: CurrencyCode,
}

/// A base exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
    pub date: NaiveDate,
    /// Annualised volatility in [0, 1]; 0 keeps the rate fixed all run.
    #[serde(default)]
    pub volatility: f64,
}

/// Monte Carlo fan-out settings.
///
/// `perturbation_factor` is accepted for schema compatibility but not
/// consumed: variance across runs comes from seed offsets alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloConfig {
    pub runs: u32,
    #[serde(default)]
    pub perturbation_factor: Decimal,
}

/// Complete request for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    #[serde(default = "default_seed")]
    pub seed: u64,
    pub horizon_days: u32,
    pub base_currency: CurrencyCode,
    pub initial_balance: Money,
    #[serde(default)]
    pub income_streams: Vec<IncomeStream>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub exchange_rates: Vec<ExchangeRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_config: Option<TaxConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monte_carlo_config: Option<MonteCarloConfig>,
}

// ---------------------------------------------------------------------------
// Output model
// ---------------------------------------------------------------------------

/// End-of-day reading of the simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySnapshot {
    pub day: u32,
    pub date: NaiveDate,
    pub balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    /// totalIncome - totalExpenses. Tax is deducted from balance but not
    /// from net cash flow.
    pub net_cash_flow: Money,
    #[serde(rename = "assetNAV")]
    pub asset_nav: Money,
    pub total_debt: Money,
    pub credit_score: Decimal,
    pub liquidity_ratio: Decimal,
    pub shock_resilience_index: Decimal,
    pub tax_paid: Money,
    pub capital_gains_tax: Money,
}

/// Expected final balance plus the 5th/95th percentile band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalBalance {
    pub expected: Money,
    pub p5: Money,
    pub p95: Money,
}

/// Qualitative health label derived from end-of-run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibeState {
    Thriving,
    Stable,
    Strained,
    Critical,
    Collapsed,
}

/// Mascot mood; a pure function of the vibe state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetState {
    Happy,
    Content,
    Anxious,
    Distressed,
    Fainted,
}

impl VibeState {
    pub fn pet(self) -> PetState {
        match self {
            VibeState::Thriving => PetState::Happy,
            VibeState::Stable => PetState::Content,
            VibeState::Strained => PetState::Anxious,
            VibeState::Critical => PetState::Distressed,
            VibeState::Collapsed => PetState::Fainted,
        }
    }
}

/// Complete result of one simulation (single run or Monte Carlo).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
    pub seed: u64,
    pub horizon_days: u32,
    pub base_currency: CurrencyCode,
    pub computed_at: DateTime<Utc>,
    pub snapshots: Vec<DailySnapshot>,
    pub final_balance: FinalBalance,
    pub collapse_probability: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse_day: Option<u32>,
    pub vibe_state: VibeState,
    pub pet_state: PetState,
    pub final_credit_score: Decimal,
    pub shock_resilience_index: Decimal,
    #[serde(rename = "finalNAV")]
    pub final_nav: Money,
    pub final_liquidity_ratio: Decimal,
}
