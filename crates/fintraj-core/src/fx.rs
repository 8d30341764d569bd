//! Cross-currency conversion with volatility-adjusted daily rates.

use std::collections::HashMap;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::FinTrajError;
use crate::rng::SimRng;
use crate::types::{CurrencyCode, ExchangeRate, Money};
use crate::FinTrajResult;

const DAYS_PER_YEAR: f64 = 365.0;
/// Floor on the daily volatility multiplier; keeps a shocked rate positive.
const RATE_FLOOR_FACTOR: f64 = 0.01;

/// One audit entry per cross-currency conversion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub day: u32,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub original_amount: Money,
    pub converted_amount: Money,
    pub rate_used: Decimal,
    pub context: String,
}

#[derive(Debug, Clone)]
struct BaseRate {
    rate: Decimal,
    volatility: f64,
}

/// Conversion engine for one simulation run.
///
/// Base rates are keyed by (from, to); a missing direction falls back to the
/// inverse pair. Daily rates are cached per (day, from, to) and the exact
/// decimal reciprocal is stored at insertion time, so converting A->B->A on
/// the same day reverses cleanly instead of re-deriving the reverse rate.
#[derive(Debug, Clone)]
pub struct FxEngine {
    base_rates: HashMap<(CurrencyCode, CurrencyCode), BaseRate>,
    daily_cache: HashMap<(u32, CurrencyCode, CurrencyCode), Decimal>,
    log: Vec<ConversionRecord>,
}

impl FxEngine {
    /// Later entries for the same currency pair win.
    pub fn new(rates: &[ExchangeRate]) -> Self {
        let mut base_rates = HashMap::new();
        for r in rates {
            base_rates.insert(
                (r.from.clone(), r.to.clone()),
                BaseRate {
                    rate: r.rate,
                    volatility: r.volatility,
                },
            );
        }
        Self {
            base_rates,
            daily_cache: HashMap::new(),
            log: Vec::new(),
        }
    }

    /// Pure lookup: is a direct or inverse base rate known?
    pub fn has_rate(&self, from: &str, to: &str) -> bool {
        from == to
            || self
                .base_rates
                .contains_key(&(from.to_string(), to.to_string()))
            || self
                .base_rates
                .contains_key(&(to.to_string(), from.to_string()))
    }

    /// The volatility-adjusted rate for one day.
    ///
    /// A zero-volatility pair returns its base rate without consuming the
    /// random stream. Cache hits never consume it either.
    pub fn daily_rate(
        &mut self,
        from: &str,
        to: &str,
        day: u32,
        rng: &mut SimRng,
    ) -> FinTrajResult<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        let key = (day, from.to_string(), to.to_string());
        if let Some(rate) = self.daily_cache.get(&key) {
            return Ok(*rate);
        }

        let base = if let Some(b) = self.base_rates.get(&(from.to_string(), to.to_string())) {
            b.clone()
        } else if let Some(b) = self.base_rates.get(&(to.to_string(), from.to_string())) {
            BaseRate {
                rate: Decimal::ONE / b.rate,
                volatility: b.volatility,
            }
        } else {
            return Err(FinTrajError::NoExchangeRate {
                from: from.to_string(),
                to: to.to_string(),
            });
        };

        let rate = if base.volatility == 0.0 {
            base.rate
        } else {
            let shock = rng.gaussian(0.0, base.volatility / DAYS_PER_YEAR.sqrt());
            let factor = (1.0 + shock).max(RATE_FLOOR_FACTOR);
            let factor = Decimal::from_f64(factor).ok_or_else(|| FinTrajError::NonFinite {
                context: format!("fx factor for {from}->{to}"),
            })?;
            base.rate * factor
        };

        self.daily_cache.insert(key, rate);
        let reverse = (day, to.to_string(), from.to_string());
        self.daily_cache.entry(reverse).or_insert(Decimal::ONE / rate);
        Ok(rate)
    }

    /// Convert an amount into another currency at the day's rate.
    ///
    /// Same-currency conversions pass through unchanged and are not logged.
    pub fn convert(
        &mut self,
        amount: Money,
        from: &str,
        to: &str,
        day: u32,
        rng: &mut SimRng,
        context: &str,
    ) -> FinTrajResult<Money> {
        if from == to {
            return Ok(amount);
        }
        let rate = self.daily_rate(from, to, day, rng)?;
        let converted = amount * rate;
        self.log.push(ConversionRecord {
            day,
            from: from.to_string(),
            to: to.to_string(),
            original_amount: amount,
            converted_amount: converted,
            rate_used: rate,
            context: context.to_string(),
        });
        Ok(converted)
    }

    pub fn conversion_log(&self) -> &[ConversionRecord] {
        &self.log
    }

    /// Drop the per-day rate cache and the audit log.
    pub fn clear_cache(&mut self) {
        self.daily_cache.clear();
        self.log.clear();
    }
}
