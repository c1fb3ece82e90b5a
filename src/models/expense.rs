//! Recurring expense model
//!
//! An expense is billed once a month on a fixed day-of-month. The day is kept
//! as a raw integer; which calendar month it lands in is decided later, against
//! a concrete pay period. The remote service may send no due day at all
//! (`"due_date": null`); such an expense is listed but never due.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NegativeAmount,
    DueDayOutOfRange(u32),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
            Self::DueDayOutOfRange(day) => {
                write!(f, "Due day must be between 1 and 31, got {}", day)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Day of the month an expense is billed on, in `1..=31`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DueDay(u32);

impl DueDay {
    pub fn new(day: u32) -> Result<Self, ExpenseValidationError> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(ExpenseValidationError::DueDayOutOfRange(day))
        }
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DueDay {
    type Error = ExpenseValidationError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<DueDay> for u32 {
    fn from(day: DueDay) -> Self {
        day.0
    }
}

impl fmt::Display for DueDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recurring monthly expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount: Money,
    #[serde(rename = "due_date", default)]
    pub due_day: Option<DueDay>,
}

impl Expense {
    pub fn new(id: ExpenseId, name: impl Into<String>, amount: Money, due_day: DueDay) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            due_day: Some(due_day),
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }
        Ok(())
    }
}
