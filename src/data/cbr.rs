//! Central Bank of Russia rate source
//!
//! The bank publishes one XML document per day listing the official rate of
//! every tracked currency against the ruble:
//!
//! ```xml
//! <ValCurs Date="09.01.2024" name="Foreign Currency Market">
//!   <Valute ID="R01235">
//!     <NumCode>840</NumCode>
//!     <CharCode>USD</CharCode>
//!     <Nominal>1</Nominal>
//!     <Name>US Dollar</Name>
//!     <Value>89,6883</Value>
//!   </Valute>
//! </ValCurs>
//! ```
//!
//! `Value` is quoted per `Nominal` units and uses a decimal comma.

use super::RateSource;
use crate::calendar::DayRange;
use crate::config::CbrConfig;
use crate::currency::Currency;
use crate::error::{FxProfitError, Result};
use crate::series::{RateSeries, Sample, SeriesCollector};
use crate::types::TradeDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

const URL_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Deserialize)]
struct ValCurs {
    #[serde(rename = "Valute", default)]
    valutes: Vec<Valute>,
}

#[derive(Debug, Deserialize)]
struct Valute {
    #[serde(rename = "NumCode")]
    num_code: Option<String>,
    #[serde(rename = "CharCode")]
    char_code: Option<String>,
    #[serde(rename = "Nominal")]
    nominal: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Value")]
    value: Option<String>,
}

impl Valute {
    fn currency(&self) -> Option<Currency> {
        let num_code = self.num_code.as_deref()?.trim().parse::<u16>().ok()?;
        let char_code = self.char_code.as_deref()?.trim();
        let name = self.name.as_deref()?.trim();
        if char_code.is_empty() {
            return None;
        }
        Some(Currency::with_num_code(num_code, char_code, name))
    }

    fn sample(&self, date: TradeDate) -> Option<Sample> {
        let nominal = self.nominal.as_deref()?.trim().parse::<i64>().ok()?;
        let value = self
            .value
            .as_deref()?
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()?;
        Some(Sample::from_quote(date, value, nominal))
    }
}

/// Parse one daily document into `(currency, sample)` pairs dated `date`.
/// Entries with missing or unparseable fields are skipped.
pub fn parse_daily(xml: &str, date: TradeDate) -> Result<Vec<(Currency, Sample)>> {
    let doc: ValCurs = quick_xml::de::from_str(xml)
        .map_err(|e| FxProfitError::ParseError(format!("CBR document for {}: {}", date, e)))?;

    let mut quotes = Vec::with_capacity(doc.valutes.len());
    for valute in doc.valutes {
        let Some(currency) = valute.currency() else {
            log::warn!("{}: skipping entry without currency identity: {:?}", date, valute);
            continue;
        };
        match valute.sample(date) {
            Some(sample) => {
                if !sample.is_valid() {
                    log::warn!("{}: non-positive quote for {}", date, currency.char_code);
                }
                quotes.push((currency, sample));
            }
            None => log::warn!("{}: unparseable quote for {}", date, currency.char_code),
        }
    }
    Ok(quotes)
}

/// Day-by-day fetcher for the central bank feed
pub struct CbrRateSource {
    client: Client,
    url_format: String,
}

impl CbrRateSource {
    /// Create a new source from its configuration
    pub fn from_config(config: &CbrConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FxProfitError::DataError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url_format: config.url_format.clone(),
        })
    }

    /// Daily document URL for `date`
    pub fn url_for(&self, date: TradeDate) -> String {
        self.url_format
            .replace("{date}", &date.format(URL_DATE_FORMAT).to_string())
    }

    fn fetch_day(&self, date: TradeDate) -> Result<String> {
        let url = self.url_for(date);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FxProfitError::DataError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FxProfitError::DataError(format!(
                "CBR returned error: {}",
                response.status()
            )));
        }

        response
            .text()
            .map_err(|e| FxProfitError::DataError(format!("Failed to read response: {}", e)))
    }
}

/// Merge the daily documents of every day in `[start, end]` into series.
///
/// `fetch_day` supplies the raw document of one day. Its first error aborts
/// the whole run; a document that does not parse only loses that day.
pub fn collect_days<F>(
    start: TradeDate,
    end: TradeDate,
    mut fetch_day: F,
) -> Result<Vec<RateSeries>>
where
    F: FnMut(TradeDate) -> Result<String>,
{
    let mut collector = SeriesCollector::new();

    for date in DayRange::new(start, end) {
        let body = fetch_day(date)?;
        match parse_daily(&body, date) {
            Ok(quotes) => {
                for (currency, sample) in &quotes {
                    collector.push(currency, *sample);
                }
            }
            Err(e) => log::warn!("Skipping {}: {}", date, e),
        }
    }

    log::info!(
        "Fetched {} samples for {} currencies from CBR",
        collector.sample_count(),
        collector.currency_count()
    );
    Ok(collector.finish())
}

impl RateSource for CbrRateSource {
    fn fetch(&self, start: TradeDate, end: TradeDate) -> Result<Vec<RateSeries>> {
        collect_days(start, end, |date| self.fetch_day(date))
    }

    fn name(&self) -> &str {
        "cbr"
    }
}
