use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Immutable engine tuning. One instance is passed to `simulate_with_config`
/// and shared read-only by every run; there is no global state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Calendar date of day 0. Snapshot dates are `epoch + day`.
    pub epoch: NaiveDate,
    /// Credit score every run starts from.
    pub initial_credit_score: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epoch: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid epoch date"),
            initial_credit_score: dec!(650),
        }
    }
}
