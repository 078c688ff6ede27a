//! Money type for representing currency amounts
//!
//! Wraps `rust_decimal::Decimal` so sub-cent inputs survive until a sum is
//! taken. Every sum is rounded to cents right after it is computed, never
//! deferred to display, so totals and transfer balances cannot drift.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A signed monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wrap a decimal amount as-is
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create an amount from whole cents
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to cents, midpoint away from zero
    pub fn round_cents(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Sum a sequence of amounts and round the total to cents once
    pub fn sum_rounded<I: IntoIterator<Item = Money>>(iter: I) -> Self {
        iter.into_iter().sum::<Money>().round_cents()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Lossy conversion for charting and percentages shown to humans
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "-$10.50", "1,250.00"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.trim_start_matches('$').replace(',', "");
        if rest.is_empty() || rest.starts_with('-') {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value = Decimal::from_str(&rest)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, always two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.round_cents().0;
        if rounded < Decimal::ZERO {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rounded_sum_of_sub_cent_amounts() {
        let total = Money::sum_rounded(vec![Money::new(dec!(10.004)), Money::new(dec!(10.004))]);
        assert_eq!(total.amount(), dec!(20.01));
        assert_eq!(total.to_string(), "$20.01");
    }

    #[test]
    fn test_round_cents_midpoint() {
        assert_eq!(Money::new(dec!(2.345)).round_cents().amount(), dec!(2.35));
        assert_eq!(Money::new(dec!(-2.345)).round_cents().amount(), dec!(-2.35));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).format_with_symbol("€"), "€0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(-a, Money::from_cents(-1000));
        assert_eq!((-a).abs(), a);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("$10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("-10.50").unwrap(), Money::from_cents(-1050));
        assert_eq!(Money::parse("-$1,250").unwrap(), Money::from_cents(-125000));
        assert_eq!(Money::parse("300").unwrap(), Money::from_cents(30000));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_serialization_keeps_precision() {
        let m = Money::new(dec!(10.004));
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
