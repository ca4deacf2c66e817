//! Monetary profit of trading one currency's best window

use crate::currency::Currency;
use crate::error::{FxProfitError, Result};
use crate::scanner::{self, ScanResult};
use crate::series::RateSeries;
use crate::types::{Money, Rate};
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// A currency together with the best window found in its series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyProfit {
    pub currency: Currency,
    pub scan: Option<ScanResult>,
    pub capital: Money,
}

impl CurrencyProfit {
    /// Scan `series` and bind the result to `capital`
    pub fn load(series: &RateSeries, capital: Money) -> Self {
        Self {
            currency: series.currency().clone(),
            scan: scanner::scan_series(series),
            capital,
        }
    }

    /// Scan result; `InvalidState` when the series had no usable sample
    pub fn scan_result(&self) -> Result<&ScanResult> {
        self.scan.as_ref().ok_or_else(|| {
            FxProfitError::InvalidState(format!(
                "no scan result for currency {}",
                self.currency.id
            ))
        })
    }

    /// Profit of buying at the best buy rate and selling at the best sell
    /// rate with `capital` base units: `delta * capital / buy_rate`.
    pub fn capital_profit(&self, capital: Money) -> Result<Money> {
        let scan = self.scan_result()?;
        let context = || format!("capital profit for {}", self.currency.char_code);

        let delta = to_money(scan.delta).ok_or_else(|| FxProfitError::overflow(context()))?;
        let buy_rate = to_money(scan.buy.rate).ok_or_else(|| FxProfitError::overflow(context()))?;

        delta
            .checked_mul(capital)
            .and_then(|scaled| scaled.checked_div(buy_rate))
            .ok_or_else(|| FxProfitError::overflow(context()))
    }

    /// `capital_profit` for the capital this profit was created with
    pub fn profit(&self) -> Result<Money> {
        self.capital_profit(self.capital)
    }
}

fn to_money(rate: Rate) -> Option<Money> {
    Money::from_f64(rate)
}
