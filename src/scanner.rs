//! Single pass search for the best buy/sell pair in a rate series
//!
//! The scan keeps a committed buy point and a provisional cheaper candidate
//! found after it. The candidate only replaces the committed buy point when
//! pairing it with the current sample beats the best delta seen so far.
//! Per sample the three checks run in a fixed order:
//!
//! 1. extend the sell side against the committed buy rate;
//! 2. record a new candidate low (below both the committed and the current
//!    candidate rate);
//! 3. re-base onto the candidate when it yields a strictly larger delta.
//!
//! Step 3 sees the candidate recorded by step 2 in the same iteration, and
//! ties never move an endpoint, so the earliest pair reaching the maximum is
//! reported.

use crate::series::{RateSeries, Sample};
use crate::types::Rate;
use serde::{Deserialize, Serialize};

/// Best pair found in one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub buy: Sample,
    pub sell: Sample,
    /// `sell.rate - buy.rate`; zero when no rising pair exists
    pub delta: Rate,
}

impl ScanResult {
    /// Whether trading this pair gains anything
    pub fn is_profitable(&self) -> bool {
        self.delta > 0.0
    }
}

/// Scan date ordered samples. Samples without a usable rate are skipped.
///
/// Returns `None` when no usable sample remains. Otherwise the result always
/// has `buy` at or before `sell`; with a single sample, or a series that never
/// rises, both are the first usable sample and `delta` is zero.
pub fn scan<'a, I>(samples: I) -> Option<ScanResult>
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut usable = samples.into_iter().filter(|s| s.is_valid());
    let first = *usable.next()?;

    let mut committed_buy_rate = first.rate;
    let mut candidate_buy_rate = Rate::INFINITY;
    let mut candidate_buy: Option<Sample> = None;
    let mut best_buy = first;
    let mut best_sell = first;
    let mut max_delta = first.rate - first.rate;

    for &sample in usable {
        if sample.rate - committed_buy_rate > max_delta {
            max_delta = sample.rate - committed_buy_rate;
            best_sell = sample;
        }

        if sample.rate < committed_buy_rate && sample.rate < candidate_buy_rate {
            candidate_buy_rate = sample.rate;
            candidate_buy = Some(sample);
        }

        if sample.rate - candidate_buy_rate > max_delta {
            if let Some(candidate) = candidate_buy.take() {
                max_delta = sample.rate - candidate_buy_rate;
                committed_buy_rate = candidate_buy_rate;
                candidate_buy_rate = Rate::INFINITY;
                best_buy = candidate;
                best_sell = sample;
            }
        }
    }

    Some(ScanResult {
        buy: best_buy,
        sell: best_sell,
        delta: max_delta,
    })
}

/// Scan every usable sample of `series`
pub fn scan_series(series: &RateSeries) -> Option<ScanResult> {
    scan(series.samples())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TradeDate;
    use chrono::Duration;

    fn samples(rates: &[f64]) -> Vec<Sample> {
        let start = TradeDate::from_ymd_opt(2024, 1, 1).unwrap();
        rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| Sample::new(start + Duration::days(i as i64), rate))
            .collect()
    }

    fn pair(rates: &[f64]) -> (f64, f64, f64) {
        let result = scan(&samples(rates)).unwrap();
        (result.buy.rate, result.sell.rate, result.delta)
    }

    #[test]
    fn test_empty_input() {
        assert!(scan(&samples(&[])).is_none());
    }

    #[test]
    fn test_only_unusable_samples() {
        assert!(scan(&samples(&[f64::NAN, -1.0, 0.0])).is_none());
    }

    #[test]
    fn test_single_sample() {
        let input = samples(&[42.0]);
        let result = scan(&input).unwrap();
        assert_eq!(result.buy, input[0]);
        assert_eq!(result.sell, input[0]);
        assert_eq!(result.delta, 0.0);
        assert!(!result.is_profitable());
    }

    #[test]
    fn test_all_equal_keeps_first() {
        let input = samples(&[7.0, 7.0, 7.0]);
        let result = scan(&input).unwrap();
        assert_eq!(result.buy, input[0]);
        assert_eq!(result.sell, input[0]);
        assert_eq!(result.delta, 0.0);
    }

    #[test]
    fn test_strictly_decreasing() {
        let input = samples(&[10.0, 8.0, 6.0, 4.0]);
        let result = scan(&input).unwrap();
        assert_eq!(result.buy, input[0]);
        assert_eq!(result.sell, input[0]);
        assert_eq!(result.delta, 0.0);
    }

    #[test]
    fn test_rebase_past_local_dip() {
        assert_eq!(pair(&[5.0, 1.0, 10.0, 3.0, 12.0]), (1.0, 12.0, 11.0));
    }

    #[test]
    fn test_rebase_on_last_sample() {
        let input = samples(&[30.0, 32.0, 28.0, 40.0]);
        let result = scan(&input).unwrap();
        assert_eq!(result.buy, input[2]);
        assert_eq!(result.sell, input[3]);
        assert_eq!(result.delta, 12.0);
    }

    #[test]
    fn test_later_low_without_better_sell_is_ignored() {
        // The dip to 2 never recovers enough to beat 10 -> 20.
        assert_eq!(pair(&[10.0, 20.0, 2.0, 11.0]), (10.0, 20.0, 10.0));
    }

    #[test]
    fn test_equal_delta_keeps_earliest_pair() {
        let input = samples(&[1.0, 3.0, 1.0, 3.0]);
        let result = scan(&input).unwrap();
        assert_eq!(result.buy, input[0]);
        assert_eq!(result.sell, input[1]);
    }

    #[test]
    fn test_nan_samples_are_skipped() {
        let input = samples(&[f64::NAN, 4.0, f64::NAN, 2.0, 9.0]);
        let result = scan(&input).unwrap();
        assert_eq!(result.buy, input[3]);
        assert_eq!(result.sell, input[4]);
        assert_eq!(result.delta, 7.0);
    }
}
