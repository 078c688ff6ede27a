//! Calendar month keys
//!
//! Every budget record is scoped by a month key in "YYYY-MM" form.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MIN_ORDINAL: i64 = 12;
const MAX_ORDINAL: i64 = 9999 * 12 + 11;

/// A calendar month ("2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    // Field order matters: derived Ord compares year first
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        if !(1..=9999).contains(&year) {
            return Err(MonthParseError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`, saturated to the supported year range
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_ordinal(i64::from(date.year()) * 12 + i64::from(date.month()) - 1)
    }

    /// The current month according to the local clock
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months since year zero; used for distance arithmetic
    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Month at `ordinal`, clamped to 0001-01..=9999-12 so every key
    /// round-trips through its string form
    fn from_ordinal(ordinal: i64) -> Self {
        let ordinal = ordinal.clamp(MIN_ORDINAL, MAX_ORDINAL);
        let year = ordinal.div_euclid(12) as i32;
        let month = ordinal.rem_euclid(12) as u32 + 1;
        Self { year, month }
    }

    /// Shift by `months` (negative goes back in time).
    ///
    /// Saturates at 0001-01 and 9999-12; use `checked_offset` to detect it.
    pub fn offset(&self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal().saturating_add(months))
    }

    /// Shift by `months`, or `None` when the result leaves 0001-01..=9999-12
    pub fn checked_offset(&self, months: i64) -> Option<Self> {
        let ordinal = self.ordinal().checked_add(months)?;
        (MIN_ORDINAL..=MAX_ORDINAL)
            .contains(&ordinal)
            .then(|| Self::from_ordinal(ordinal))
    }

    /// The following calendar month
    pub fn next(&self) -> Self {
        self.offset(1)
    }

    /// The preceding calendar month
    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    /// Signed number of months from `self` to `other`
    pub fn months_until(&self, other: &MonthKey) -> i64 {
        other.ordinal() - self.ordinal()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        match self.checked_offset(1) {
            Some(next) => next.first_day().pred_opt().unwrap_or_else(|| self.first_day()),
            None => NaiveDate::from_ymd_opt(self.year, 12, 31).unwrap_or_else(|| self.first_day()),
        }
    }

    /// Whether `date` falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human-friendly label ("January 2025")
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        if year.len() != 4 || month.len() != 2 {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(month: MonthKey) -> Self {
        month.to_string()
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid month '{}', expected YYYY-MM", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month number: {}", m),
            Self::InvalidYear(y) => write!(f, "Invalid year: {}", y),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let month = m("2025-01");
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), 1);
        assert_eq!(month.to_string(), "2025-01");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("2025-00".parse::<MonthKey>().is_err());
        assert!("2025-1".parse::<MonthKey>().is_err());
        assert!("202501".parse::<MonthKey>().is_err());
        assert!("abcd-01".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_offset_saturates_at_year_bounds() {
        let last = m("9999-12");
        assert_eq!(last.next(), last);
        assert_eq!(last.checked_offset(1), None);
        assert_eq!(last.checked_offset(-1), Some(m("9999-11")));
        assert_eq!(last.next().to_string().parse::<MonthKey>().unwrap(), last);

        let first = m("0001-01");
        assert_eq!(first.prev(), first);
        assert_eq!(first.checked_offset(-1), None);
        assert_eq!(first.offset(i64::MIN), first);
        assert_eq!(last.last_day(), NaiveDate::from_ymd_opt(9999, 12, 31).unwrap());
    }

    #[test]
    fn test_next_and_prev_cross_year() {
        assert_eq!(m("2024-12").next(), m("2025-01"));
        assert_eq!(m("2025-01").prev(), m("2024-12"));
        assert_eq!(m("2025-03").offset(-14), m("2024-01"));
    }

    #[test]
    fn test_months_until() {
        assert_eq!(m("2025-01").months_until(&m("2025-04")), 3);
        assert_eq!(m("2025-04").months_until(&m("2024-12")), -4);
    }

    #[test]
    fn test_ordering() {
        assert!(m("2024-12") < m("2025-01"));
        assert!(m("2025-02") > m("2025-01"));
    }

    #[test]
    fn test_day_bounds() {
        let feb = m("2024-02");
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&m("2025-02")).unwrap();
        assert_eq!(json, "\"2025-02\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m("2025-02"));
        assert!(serde_json::from_str::<MonthKey>("\"2025-15\"").is_err());
    }
}
