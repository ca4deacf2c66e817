//! Core types and constants

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Calendar date of a published rate
pub type TradeDate = NaiveDate;

/// Exchange rate: units of base currency per one unit of a foreign currency
pub type Rate = f64;

/// Money amount in the base currency
pub type Money = Decimal;

/// Decimal places used when presenting money
pub const MONEY_DECIMALS: u32 = 2;

/// Default display name of the base currency (rates are quoted against it)
pub const DEFAULT_BASE_CURRENCY: &str = "RUB";
