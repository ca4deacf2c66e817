//! Calendar helpers: inclusive day ranges and user date parsing

use crate::error::{FxProfitError, Result};
use crate::types::TradeDate;
use chrono::{Duration, Local};

/// Date formats accepted from users, tried in order
const INPUT_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y", "%Y/%m/%d"];

/// Current date in the local timezone
pub fn today() -> TradeDate {
    Local::now().date_naive()
}

/// Parse a user supplied date in one of the accepted formats
pub fn parse_date(input: &str) -> Result<TradeDate> {
    let trimmed = input.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| TradeDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| FxProfitError::ParseError(format!("Unrecognised date: '{}'", trimmed)))
}

/// Every calendar day between two dates, both ends included
#[derive(Debug, Clone)]
pub struct DayRange {
    next: Option<TradeDate>,
    end: TradeDate,
}

impl DayRange {
    /// Create a range; empty when `start > end`
    pub fn new(start: TradeDate, end: TradeDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for DayRange {
    type Item = TradeDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.end {
            Some(current + Duration::days(1))
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> TradeDate {
        TradeDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-05").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_date("05/03/2024").unwrap(), date(2024, 3, 5));
        assert_eq!(parse_date(" 05.03.2024 ").unwrap(), date(2024, 3, 5));
        assert!(parse_date("March 5th").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_day_range_inclusive() {
        let days: Vec<_> = DayRange::new(date(2024, 2, 27), date(2024, 3, 1)).collect();
        assert_eq!(
            days,
            vec![date(2024, 2, 27), date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_day_range_single_and_empty() {
        assert_eq!(DayRange::new(date(2024, 1, 1), date(2024, 1, 1)).count(), 1);
        assert_eq!(DayRange::new(date(2024, 1, 2), date(2024, 1, 1)).count(), 0);
    }
}
