//! Money type for representing currency amounts
//!
//! Amounts are held as exact decimals so that sums never pick up
//! floating-point drift. On disk an amount is a plain JSON number.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A monetary amount with exact decimal arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a decimal value
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "+10.50", "$10.50", "10", "1e3"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        if rest.is_empty() || rest.starts_with(['-', '+']) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value = if rest.contains(['e', 'E']) {
            Decimal::from_scientific(rest)
        } else {
            Decimal::from_str(rest)
        }
        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Whether the amount survives being written as a JSON number
    ///
    /// The store keeps amounts as binary floats, so values with more
    /// significant digits than an `f64` holds would come back changed.
    pub fn is_storable(&self) -> bool {
        self.0
            .to_f64()
            .filter(|f| f.is_finite())
            .and_then(|f| Decimal::from_str(&f.to_string()).ok())
            .is_some_and(|back| back == self.0)
    }

    /// Format with a currency symbol, always showing two decimal places
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.0.round_dp(2);
        if self.is_negative() {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
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

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
