//! Analysis outcome and its textual/JSON rendering

use crate::error::{FxProfitError, Result, ValidationError};
use crate::profit::CurrencyProfit;
use crate::scanner::ScanResult;
use crate::types::{Money, MONEY_DECIMALS};
use rust_decimal::RoundingStrategy;
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;

const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Why an analysis produced no report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to fetch exchange rates. Please try again later.")]
    NoData,

    #[error("Could not find the most profitable currency for the given period.")]
    NoProfitableCurrency,

    #[error("Capital value is out of the supported range.")]
    CapitalOutOfRange,

    #[error("An error occurred. Please try again later.")]
    Internal,
}

impl From<&FxProfitError> for AnalysisError {
    fn from(err: &FxProfitError) -> Self {
        match err {
            FxProfitError::Validation(v) => AnalysisError::Validation(*v),
            FxProfitError::NoData | FxProfitError::DataError(_) => AnalysisError::NoData,
            FxProfitError::NoProfitableCurrency => AnalysisError::NoProfitableCurrency,
            FxProfitError::NumericOverflow { .. } => AnalysisError::CapitalOutOfRange,
            _ => AnalysisError::Internal,
        }
    }
}

/// Successful analysis: the winning currency and the capital math
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub best: CurrencyProfit,
    pub initial_capital: Money,
    pub accumulated_capital: Money,
    pub profit: Money,
}

impl AnalysisReport {
    /// Best window of the winning currency
    pub fn window(&self) -> Option<&ScanResult> {
        self.best.scan.as_ref()
    }

    /// Whether the best deal actually gains money
    pub fn is_profitable(&self) -> bool {
        self.profit > Money::ZERO
    }

    /// Multi-line report, money suffixed with `base_currency`
    pub fn render(&self, base_currency: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Most profitable currency = {}", self.best.currency.display_name());
        let _ = writeln!(
            out,
            "Initial capital = {} {}",
            format_money(self.initial_capital),
            base_currency
        );
        let _ = writeln!(
            out,
            "Accumulated capital = {} {}",
            format_money(self.accumulated_capital),
            base_currency
        );
        if let Some(window) = self.window() {
            let _ = writeln!(out, "Best date to buy = {}", window.buy.date.format(REPORT_DATE_FORMAT));
            let _ = writeln!(out, "Best date to sell = {}", window.sell.date.format(REPORT_DATE_FORMAT));
        }
        let _ = writeln!(out, "Profit = {} {}", format_money(self.profit), base_currency);
        out
    }

    /// Pretty JSON document of the report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of one analysis run: exactly one of a report or an error
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Success(AnalysisReport),
    Failure(AnalysisError),
}

impl AnalysisResult {
    /// Check if the run produced a report
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }

    /// Get the report of a successful run
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisResult::Success(report) => Some(report),
            AnalysisResult::Failure(_) => None,
        }
    }

    /// Get the reason a run failed
    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            AnalysisResult::Success(_) => None,
            AnalysisResult::Failure(err) => Some(err),
        }
    }

    /// The report, or the one-line error message
    pub fn render(&self, base_currency: &str) -> String {
        match self {
            AnalysisResult::Success(report) => report.render(base_currency),
            AnalysisResult::Failure(err) => err.to_string(),
        }
    }
}

/// Money rounded half away from zero to two places, always showing both
pub fn format_money(amount: Money) -> String {
    let rounded =
        amount.round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::series::Sample;
    use crate::types::TradeDate;
    use rust_decimal_macros::dec;

    fn report() -> AnalysisReport {
        let buy = Sample::new(TradeDate::from_ymd_opt(2024, 1, 3).unwrap(), 28.0);
        let sell = Sample::new(TradeDate::from_ymd_opt(2024, 1, 4).unwrap(), 40.0);
        AnalysisReport {
            best: CurrencyProfit {
                currency: Currency::with_num_code(840, "USD", "US Dollar"),
                scan: Some(ScanResult {
                    buy,
                    sell,
                    delta: 12.0,
                }),
                capital: dec!(1000),
            },
            initial_capital: dec!(1000),
            accumulated_capital: dec!(1428.5714285714),
            profit: dec!(428.5714285714),
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(1000)), "1000.00");
        assert_eq!(format_money(dec!(428.5714)), "428.57");
        assert_eq!(format_money(dec!(0.125)), "0.13");
        assert_eq!(format_money(dec!(-0.125)), "-0.13");
    }

    #[test]
    fn test_render_report() {
        let text = report().render("RUB");
        assert_eq!(
            text,
            "Most profitable currency = US Dollar\n\
             Initial capital = 1000.00 RUB\n\
             Accumulated capital = 1428.57 RUB\n\
             Best date to buy = 03/01/2024\n\
             Best date to sell = 04/01/2024\n\
             Profit = 428.57 RUB\n"
        );
    }

    #[test]
    fn test_failure_renders_message() {
        let result = AnalysisResult::Failure(AnalysisError::Validation(
            ValidationError::NonPositiveCapital,
        ));
        assert!(!result.is_success());
        assert!(result.report().is_none());
        assert_eq!(result.render("RUB"), "Initial capital must be greater than zero.");
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            AnalysisError::from(&FxProfitError::DataError("timeout".into())),
            AnalysisError::NoData
        );
        assert_eq!(
            AnalysisError::from(&FxProfitError::overflow("x")),
            AnalysisError::CapitalOutOfRange
        );
        assert_eq!(
            AnalysisError::from(&FxProfitError::InvalidState("x".into())),
            AnalysisError::Internal
        );
    }

    #[test]
    fn test_json_report() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["best"]["currency"]["char_code"], "USD");
        assert_eq!(value["initial_capital"], "1000");
        assert_eq!(value["best"]["scan"]["buy"]["date"], "2024-01-03");
    }
}
