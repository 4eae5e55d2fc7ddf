//! Expense model
//!
//! A single spend event: what it was, how much, and the day it was recorded.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// An expense record
///
/// Field order matches the on-disk layout: id, description, amount, date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, immutable after creation
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Non-negative amount
    pub amount: Money,

    /// Day the expense was recorded (serialized as YYYY-MM-DD)
    pub date: NaiveDate,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        id: ExpenseId,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            date,
        }
    }

    /// Month of year (1-12) the expense falls in
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }

        if !self.amount.is_storable() {
            return Err(ExpenseValidationError::AmountTooPrecise);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NegativeAmount,
    AmountTooPrecise,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
            Self::AmountTooPrecise => {
                write!(f, "Amount has too many significant digits to store exactly")
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
