//! Pay cycle and pay period representation
//!
//! A pay cycle is anchored on the most recent pay date. The pay period it
//! produces runs from the day after that paycheck through the next paycheck,
//! inclusive on both ends.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{NextCheckError, NextCheckResult};

/// Date format used for every date exchanged with stores and the API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Bi-weekly cycle length
pub const DEFAULT_CYCLE_LENGTH_DAYS: u32 = 14;

/// Longest accepted cycle
pub const MAX_CYCLE_LENGTH_DAYS: u32 = 366;

/// Parse a stored pay date
///
/// Absent and unparseable values are both `InvalidInput`: callers show the
/// "Calculating..." placeholder instead of deriving anything.
pub fn parse_pay_date(value: Option<&str>) -> NextCheckResult<NaiveDate> {
    let raw = value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NextCheckError::InvalidInput("last pay date is not set".into()))?;

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        NextCheckError::InvalidInput(format!("last pay date '{}' is not YYYY-MM-DD: {}", raw, e))
    })
}

/// A recurring pay cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCycle {
    pub last_pay_date: NaiveDate,
    pub cycle_length_days: u32,
}

impl PayCycle {
    /// Create a pay cycle, rejecting lengths outside `1..=MAX_CYCLE_LENGTH_DAYS`
    pub fn new(last_pay_date: NaiveDate, cycle_length_days: u32) -> NextCheckResult<Self> {
        if !(1..=MAX_CYCLE_LENGTH_DAYS).contains(&cycle_length_days) {
            return Err(NextCheckError::Validation(format!(
                "pay cycle length must be between 1 and {} days, got {}",
                MAX_CYCLE_LENGTH_DAYS, cycle_length_days
            )));
        }
        Ok(Self {
            last_pay_date,
            cycle_length_days,
        })
    }

    /// A bi-weekly cycle
    pub fn bi_weekly(last_pay_date: NaiveDate) -> Self {
        Self {
            last_pay_date,
            cycle_length_days: DEFAULT_CYCLE_LENGTH_DAYS,
        }
    }

    /// Derive the upcoming pay period
    ///
    /// A period that would end past the last representable date is
    /// `InvalidInput`, like an unusable pay date.
    pub fn period(&self) -> NextCheckResult<PayPeriod> {
        let shift = |days: u32| {
            self.last_pay_date
                .checked_add_days(Days::new(u64::from(days)))
                .ok_or_else(|| {
                    NextCheckError::InvalidInput(format!(
                        "pay period after {} is out of the supported date range",
                        self.last_pay_date.format(DATE_FORMAT)
                    ))
                })
        };

        let next_pay_date = shift(self.cycle_length_days)?;
        Ok(PayPeriod {
            start: shift(1)?,
            end: next_pay_date,
            next_pay_date,
        })
    }

    /// The cycle that starts on this cycle's next pay date
    pub fn advanced(&self) -> NextCheckResult<Self> {
        Ok(Self {
            last_pay_date: self.period()?.next_pay_date,
            cycle_length_days: self.cycle_length_days,
        })
    }
}

/// The inclusive date range between two paychecks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub next_pay_date: NaiveDate,
}

impl PayPeriod {
    /// Check if a date falls within this period (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered by the period
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
