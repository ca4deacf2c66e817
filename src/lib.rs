//! # fx-profit
//!
//! Finds the single most profitable buy-then-sell window across the daily
//! exchange rates of every tracked currency.
//!
//! For each currency a one-pass scan finds the buy/sell dates with the largest
//! rate rise; the rise is turned into money for a given capital
//! (`delta * capital / buy_rate`) and the currency earning the most wins.
//!
//! ## Example
//!
//! ```rust
//! use fx_profit::prelude::*;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let usd = RateSeries::new(
//!     Currency::new("USD", "US Dollar"),
//!     vec![
//!         Sample::new(day(1), 30.0),
//!         Sample::new(day(2), 32.0),
//!         Sample::new(day(3), 28.0),
//!         Sample::new(day(4), 40.0),
//!     ],
//! );
//!
//! let source = InMemoryRateSource::new(vec![usd]);
//! let session = AnalysisSession::new(&source).with_today(day(31));
//! let result = session.run(day(1), day(4), Decimal::from(1000));
//!
//! let report = result.report().unwrap();
//! assert_eq!(report.window().unwrap().buy.date, day(3));
//! assert_eq!(report.profit.round_dp(2).to_string(), "428.57");
//! ```

pub mod calendar;
pub mod config;
pub mod currency;
pub mod data;
pub mod error;
pub mod portfolio;
pub mod profit;
pub mod report;
pub mod scanner;
pub mod series;
pub mod session;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::config::AppConfig;
    pub use crate::currency::Currency;
    pub use crate::data::{InMemoryRateSource, RateSource, SourceRegistry};
    pub use crate::error::{FxProfitError, Result, ValidationError};
    pub use crate::portfolio::select_best;
    pub use crate::profit::CurrencyProfit;
    pub use crate::report::{AnalysisError, AnalysisReport, AnalysisResult};
    pub use crate::scanner::{scan, ScanResult};
    pub use crate::series::{RateSeries, Sample};
    pub use crate::session::{AnalysisParams, AnalysisSession};
    pub use crate::types::*;
}
