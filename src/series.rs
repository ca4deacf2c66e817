//! Rate samples and per-currency time series

use crate::currency::Currency;
use crate::types::{Rate, TradeDate};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One published rate for one currency on one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: TradeDate,
    pub rate: Rate,
}

impl Sample {
    /// Create a sample from an already normalised rate
    pub fn new(date: TradeDate, rate: Rate) -> Self {
        Self { date, rate }
    }

    /// Create a sample from a quote of `value` base units per `nominal`
    /// foreign units. A non-positive value or nominal yields a NaN rate.
    pub fn from_quote(date: TradeDate, value: f64, nominal: i64) -> Self {
        let rate = if value > 0.0 && nominal > 0 {
            value / nominal as f64
        } else {
            Rate::NAN
        };
        Self { date, rate }
    }

    /// Whether the sample can take part in a scan
    pub fn is_valid(&self) -> bool {
        self.rate.is_finite() && self.rate > 0.0
    }
}

/// Date ordered samples of a single currency
///
/// Invariant: samples are sorted by ascending date and no date appears twice.
/// Gaps (weekends, holidays) are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    currency: Currency,
    samples: Vec<Sample>,
}

impl RateSeries {
    /// Build a series, sorting by date. When a date repeats the last sample
    /// given for it wins.
    pub fn new(currency: Currency, samples: impl IntoIterator<Item = Sample>) -> Self {
        let by_date: BTreeMap<TradeDate, Sample> =
            samples.into_iter().map(|s| (s.date, s)).collect();
        Self {
            currency,
            samples: by_date.into_values().collect(),
        }
    }

    /// Get the currency of this series
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Get the currency key
    pub fn currency_id(&self) -> &str {
        &self.currency.id
    }

    /// Get the currency name for reports
    pub fn display_name(&self) -> &str {
        self.currency.display_name()
    }

    /// Get all samples, usable or not, in date order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Samples with a usable rate, in date order
    pub fn valid_samples(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter().filter(|s| s.is_valid())
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the series has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Copy of this series limited to `[start, end]`
    pub fn restricted(&self, start: TradeDate, end: TradeDate) -> Self {
        Self {
            currency: self.currency.clone(),
            samples: self
                .samples
                .iter()
                .filter(|s| s.date >= start && s.date <= end)
                .copied()
                .collect(),
        }
    }
}

/// Accumulates samples from day-by-day fetches into one series per currency
///
/// Currencies keep the order in which they were first seen, and the metadata
/// of that first sighting. A date reported twice for the same currency keeps
/// the last value pushed.
#[derive(Debug, Default)]
pub struct SeriesCollector {
    index: HashMap<String, usize>,
    currencies: Vec<Currency>,
    samples: Vec<BTreeMap<TradeDate, Sample>>,
}

impl SeriesCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample for `currency`
    pub fn push(&mut self, currency: &Currency, sample: Sample) {
        let slot = match self.index.get(&currency.id) {
            Some(&slot) => slot,
            None => {
                let slot = self.currencies.len();
                self.index.insert(currency.id.clone(), slot);
                self.currencies.push(currency.clone());
                self.samples.push(BTreeMap::new());
                slot
            }
        };

        if self.samples[slot].insert(sample.date, sample).is_some() {
            log::debug!(
                "{}: duplicate sample for {} replaced",
                currency.id,
                sample.date
            );
        }
    }

    pub fn currency_count(&self) -> usize {
        self.currencies.len()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.iter().map(|tree| tree.len()).sum()
    }

    /// Finish ingestion, yielding series in first-seen currency order
    pub fn finish(self) -> Vec<RateSeries> {
        self.currencies
            .into_iter()
            .zip(self.samples)
            .map(|(currency, tree)| RateSeries {
                currency,
                samples: tree.into_values().collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> TradeDate {
        TradeDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_sample_from_quote() {
        let sample = Sample::from_quote(date(1), 7350.0, 100);
        assert_eq!(sample.rate, 73.5);
        assert!(sample.is_valid());

        assert!(Sample::from_quote(date(1), 73.5, 0).rate.is_nan());
        assert!(Sample::from_quote(date(1), -1.0, 1).rate.is_nan());
        assert!(!Sample::from_quote(date(1), 0.0, 1).is_valid());
    }

    #[test]
    fn test_series_sorted_and_deduplicated() {
        let series = RateSeries::new(
            Currency::new("USD", "US Dollar"),
            vec![
                Sample::new(date(3), 3.0),
                Sample::new(date(1), 1.0),
                Sample::new(date(3), 4.0),
            ],
        );
        let rates: Vec<_> = series.samples().iter().map(|s| s.rate).collect();
        assert_eq!(rates, vec![1.0, 4.0]);
    }

    #[test]
    fn test_valid_samples_skip_nan() {
        let series = RateSeries::new(
            Currency::new("USD", "US Dollar"),
            vec![
                Sample::new(date(1), 1.0),
                Sample::from_quote(date(2), 5.0, 0),
                Sample::new(date(3), 2.0),
            ],
        );
        assert_eq!(series.len(), 3);
        assert_eq!(series.valid_samples().count(), 2);
    }

    #[test]
    fn test_restricted() {
        let series = RateSeries::new(
            Currency::new("USD", "US Dollar"),
            (1..=5).map(|d| Sample::new(date(d), d as f64)),
        );
        let window = series.restricted(date(2), date(4));
        assert_eq!(window.len(), 3);
        assert_eq!(window.samples()[0].date, date(2));
    }

    #[test]
    fn test_collector_merges_by_currency_and_date() {
        let usd = Currency::with_num_code(840, "USD", "US Dollar");
        let eur = Currency::with_num_code(978, "EUR", "Euro");
        let renamed_usd = Currency::with_num_code(840, "USD", "Dollar");

        let mut collector = SeriesCollector::new();
        collector.push(&eur, Sample::new(date(1), 90.0));
        collector.push(&usd, Sample::new(date(1), 80.0));
        collector.push(&renamed_usd, Sample::new(date(2), 81.0));
        collector.push(&usd, Sample::new(date(1), 79.5));

        assert_eq!(collector.currency_count(), 2);
        assert_eq!(collector.sample_count(), 3);

        let series = collector.finish();
        assert_eq!(series[0].currency_id(), "978");
        assert_eq!(series[1].currency_id(), "840");
        assert_eq!(series[1].display_name(), "US Dollar");
        assert_eq!(series[1].samples()[0].rate, 79.5);
        assert_eq!(series[1].samples()[1].rate, 81.0);
    }
}
