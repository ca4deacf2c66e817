//! CSV file rate source
//!
//! Reads daily quotes from a local file, one row per currency per day:
//!
//! ```text
//! date,num_code,char_code,name,nominal,value
//! 2024-01-09,840,USD,US Dollar,1,89.6883
//! 2024-01-09,392,JPY,Japanese Yen,100,62.0461
//! ```
//!
//! `num_code` may be left empty, in which case the character code identifies
//! the currency. Rows that fail to parse are skipped.

use super::RateSource;
use crate::currency::Currency;
use crate::error::{FxProfitError, Result};
use crate::series::{RateSeries, Sample, SeriesCollector};
use crate::types::TradeDate;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct QuoteRow {
    date: String,
    num_code: Option<u16>,
    char_code: String,
    name: String,
    nominal: i64,
    value: f64,
}

/// Rate source reading a CSV file on every fetch
#[derive(Debug, Clone)]
pub struct CsvRateSource {
    path: PathBuf,
}

impl CsvRateSource {
    /// Create a source reading `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse quotes from any reader, keeping rows dated within `[start, end]`
    pub fn parse_reader<R: Read>(
        reader: R,
        start: TradeDate,
        end: TradeDate,
    ) -> Result<Vec<RateSeries>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut collector = SeriesCollector::new();

        for (line, result) in reader.deserialize::<QuoteRow>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("Skipping CSV row {}: {}", line + 2, e);
                    continue;
                }
            };

            let date = match TradeDate::parse_from_str(&row.date, DATE_FORMAT) {
                Ok(date) => date,
                Err(e) => {
                    log::warn!("Skipping CSV row {}: bad date '{}': {}", line + 2, row.date, e);
                    continue;
                }
            };
            if date < start || date > end {
                continue;
            }
            if row.char_code.is_empty() {
                log::warn!("Skipping CSV row {}: missing currency code", line + 2);
                continue;
            }

            let currency = match row.num_code {
                Some(num_code) => Currency::with_num_code(num_code, &row.char_code, &row.name),
                None => Currency::new(&row.char_code, &row.name),
            };
            let sample = Sample::from_quote(date, row.value, row.nominal);
            if !sample.is_valid() {
                log::warn!(
                    "{}: dropping quote on {} (value {}, nominal {})",
                    currency.char_code,
                    date,
                    row.value,
                    row.nominal
                );
            }
            collector.push(&currency, sample);
        }

        log::debug!(
            "Parsed {} samples for {} currencies",
            collector.sample_count(),
            collector.currency_count()
        );
        Ok(collector.finish())
    }
}

impl RateSource for CsvRateSource {
    fn fetch(&self, start: TradeDate, end: TradeDate) -> Result<Vec<RateSeries>> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            FxProfitError::DataError(format!("Cannot open {}: {}", self.path.display(), e))
        })?;
        Self::parse_reader(file, start, end)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
