//! Pay period service
//!
//! Derives the upcoming pay period from the stored last pay date using the
//! configured cycle length.

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::NextCheckResult;
use crate::models::{parse_pay_date, PayCycle, PayPeriod};

/// Derive the pay period following `last_pay_date`
///
/// `next_pay_date = last_pay_date + cycle_length_days`; the period runs from
/// the day after `last_pay_date` through `next_pay_date`, inclusive.
pub fn derive(last_pay_date: NaiveDate, cycle_length_days: u32) -> NextCheckResult<PayPeriod> {
    PayCycle::new(last_pay_date, cycle_length_days)?.period()
}

/// Service for pay period derivation
pub struct PeriodService<'a> {
    settings: &'a Settings,
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// The pay cycle anchored on a stored (string) last pay date
    pub fn cycle_from_str(&self, last_pay: Option<&str>) -> NextCheckResult<PayCycle> {
        PayCycle::new(parse_pay_date(last_pay)?, self.settings.cycle_length_days)
    }

    /// Derive the pay period from a stored (string) last pay date
    ///
    /// Fails with `InvalidInput` when the date is absent, unparseable or too
    /// close to the end of the calendar to derive a period from.
    pub fn derive_from_str(&self, last_pay: Option<&str>) -> NextCheckResult<PayPeriod> {
        self.cycle_from_str(last_pay)?.period()
    }

    /// Derive the pay period from a last pay date
    pub fn derive(&self, last_pay_date: NaiveDate) -> NextCheckResult<PayPeriod> {
        derive(last_pay_date, self.settings.cycle_length_days)
    }
}
