//! Income record model
//!
//! Mirrors the record kept by the income service: an amount per paycheck and
//! the most recent pay date. Pay dates stay as raw strings here because the
//! store may hold a value that is missing or malformed; that is a normal,
//! renderable state rather than a decode failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::Money;
use super::period::{parse_pay_date, PayCycle, DATE_FORMAT};
use crate::error::NextCheckResult;

/// Income record as stored by the income service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: IncomeId,
    #[serde(default)]
    pub amount: Money,
    /// Most recent pay date, `YYYY-MM-DD`
    #[serde(default)]
    pub recent_pay: Option<String>,
    /// The pay date before `recent_pay`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pay: Option<String>,
}

impl IncomeRecord {
    pub fn new(id: IncomeId, amount: Money, recent_pay: Option<NaiveDate>) -> Self {
        Self {
            id,
            amount,
            recent_pay: recent_pay.map(|d| d.format(DATE_FORMAT).to_string()),
            last_pay: None,
        }
    }

    /// The parsed most recent pay date
    pub fn recent_pay_date(&self) -> NextCheckResult<NaiveDate> {
        parse_pay_date(self.recent_pay.as_deref())
    }

    /// The pay cycle anchored on the most recent pay date
    pub fn pay_cycle(&self, cycle_length_days: u32) -> NextCheckResult<PayCycle> {
        PayCycle::new(self.recent_pay_date()?, cycle_length_days)
    }

    /// Move the most recent pay date forward, remembering the previous one
    pub fn advance_recent_pay(&mut self, new_date: NaiveDate) {
        self.last_pay = self.recent_pay.take();
        self.recent_pay = Some(new_date.format(DATE_FORMAT).to_string());
    }
}

/// Request body for updating the most recent pay date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPayUpdate {
    pub recent_pay: NaiveDate,
}
