//! Exploding rate source - testing stub
//!
//! This source panics when fetched. It is used to prove that a code path
//! (for example, rejecting invalid parameters) never reaches the network.

use super::RateSource;
use crate::error::Result;
use crate::series::RateSeries;
use crate::types::TradeDate;

/// Exploding rate source
///
/// # Example
/// ```should_panic
/// use fx_profit::data::{ExplodingRateSource, RateSource};
/// use chrono::NaiveDate;
///
/// let source = ExplodingRateSource::new();
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// // This will panic!
/// source.fetch(day, day).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplodingRateSource {
    message: Option<&'static str>,
}

impl ExplodingRateSource {
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Create with custom panic message
    pub fn with_message(message: &'static str) -> Self {
        Self {
            message: Some(message),
        }
    }
}

impl RateSource for ExplodingRateSource {
    fn fetch(&self, start: TradeDate, end: TradeDate) -> Result<Vec<RateSeries>> {
        panic!(
            "{} (requested {} to {})",
            self.message
                .unwrap_or("Rate source must not be queried in this context"),
            start,
            end
        );
    }

    fn name(&self) -> &str {
        "exploding"
    }
}
