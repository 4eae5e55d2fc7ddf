//! Identifier type for expense records
//!
//! Ids are small positive integers assigned by the store, so they stay
//! readable on the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    /// The id given to the first record in an empty store
    pub const FIRST: ExpenseId = ExpenseId(1);

    /// Create an id from its numeric value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once the id space is used up
    pub const fn next(&self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ExpenseId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ExpenseId {
    type Err = ExpenseIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(ExpenseIdParseError(s.to_string())),
            Ok(value) => Ok(Self(value)),
        }
    }
}

/// Error returned when a string is not a positive integer id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseIdParseError(String);

impl fmt::Display for ExpenseIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid expense ID '{}': expected a positive integer", self.0)
    }
}

impl std::error::Error for ExpenseIdParseError {}
