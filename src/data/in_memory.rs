//! In-memory rate source
//!
//! Serves preloaded series, trimmed to the requested window. Useful for tests
//! and for embedding the analysis over data obtained elsewhere.

use super::RateSource;
use crate::currency::Currency;
use crate::error::Result;
use crate::series::{RateSeries, Sample, SeriesCollector};
use crate::types::TradeDate;

/// Rate source backed by series held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateSource {
    series: Vec<RateSeries>,
}

impl InMemoryRateSource {
    /// Create a source serving `series`
    pub fn new(series: Vec<RateSeries>) -> Self {
        Self { series }
    }

    /// Build from loose `(currency, sample)` observations, merging duplicates
    /// the same way a day-by-day feed would
    pub fn from_observations<'a>(
        observations: impl IntoIterator<Item = (&'a Currency, Sample)>,
    ) -> Self {
        let mut collector = SeriesCollector::new();
        for (currency, sample) in observations {
            collector.push(currency, sample);
        }
        Self::new(collector.finish())
    }

    /// Number of stored currencies
    pub fn num_currencies(&self) -> usize {
        self.series.len()
    }
}

impl RateSource for InMemoryRateSource {
    fn fetch(&self, start: TradeDate, end: TradeDate) -> Result<Vec<RateSeries>> {
        Ok(self
            .series
            .iter()
            .map(|series| series.restricted(start, end))
            .collect())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
