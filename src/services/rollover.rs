//! Pay date rollover
//!
//! Once today is past the next pay date, the stored last pay date moves
//! forward one cycle. Deciding that is pure ([`maybe_advance`]); submitting it
//! goes through [`RolloverAdvancer`], which sends at most one request per last
//! pay date value and does not resubmit the most recent one that went through.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{NextCheckError, NextCheckResult};
use crate::models::{IncomeId, IncomeRecord, PayCycle, PayPeriod};
use crate::storage::IncomeStore;

/// Request to move the stored last pay date forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceRequest {
    pub new_last_pay_date: NaiveDate,
}

/// Decide whether the period's pay date has passed
///
/// Strictly after: on the pay date itself nothing happens.
pub fn maybe_advance(now: NaiveDate, period: &PayPeriod) -> Option<AdvanceRequest> {
    (now > period.next_pay_date).then_some(AdvanceRequest {
        new_last_pay_date: period.next_pay_date,
    })
}

#[derive(Debug, Default)]
struct AdvanceState {
    /// Last pay dates with a request currently outstanding
    in_flight: HashSet<NaiveDate>,
    /// Last pay date most recently advanced from
    last_completed: Option<NaiveDate>,
}

/// Clears the in-flight mark even if the request future is dropped
struct InFlightGuard<'a> {
    state: &'a Mutex<AdvanceState>,
    key: NaiveDate,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.in_flight.remove(&self.key);
        }
    }
}

/// Submits rollover requests to an income store
pub struct RolloverAdvancer {
    store: Arc<dyn IncomeStore>,
    state: Mutex<AdvanceState>,
}

impl RolloverAdvancer {
    pub fn new(store: Arc<dyn IncomeStore>) -> Self {
        Self {
            store,
            state: Mutex::new(AdvanceState::default()),
        }
    }

    fn lock(&self) -> NextCheckResult<MutexGuard<'_, AdvanceState>> {
        self.state
            .lock()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire rollover lock: {}", e)))
    }

    /// Advance the stored last pay date if `now` is past the next pay date
    ///
    /// Returns the updated record when an advance was applied, `None` when
    /// nothing was due or the same advance is already in flight or done.
    /// A rejected update comes back as `UpdateFailed` and is not recorded, so
    /// a later evaluation may try again.
    pub async fn evaluate(
        &self,
        income_id: IncomeId,
        cycle: &PayCycle,
        now: NaiveDate,
    ) -> NextCheckResult<Option<IncomeRecord>> {
        let Some(request) = maybe_advance(now, &cycle.period()?) else {
            return Ok(None);
        };
        let key = cycle.last_pay_date;

        {
            let mut state = self.lock()?;
            if state.last_completed == Some(key) {
                debug!(income_id = %income_id, last_pay = %key, "rollover_already_applied");
                return Ok(None);
            }
            if !state.in_flight.insert(key) {
                debug!(income_id = %income_id, last_pay = %key, "rollover_in_flight");
                return Ok(None);
            }
        }
        let _guard = InFlightGuard {
            state: &self.state,
            key,
        };

        info!(
            income_id = %income_id,
            last_pay = %key,
            new_last_pay = %request.new_last_pay_date,
            "rollover_advance_requested"
        );

        match self
            .store
            .update_recent_pay(income_id, request.new_last_pay_date)
            .await
        {
            Ok(record) => {
                self.lock()?.last_completed = Some(key);
                info!(
                    income_id = %income_id,
                    recent_pay = %request.new_last_pay_date,
                    "rollover_advance_applied"
                );
                Ok(Some(record))
            }
            Err(e) => {
                let err = match e {
                    NextCheckError::UpdateFailed { .. } => e,
                    other => NextCheckError::UpdateFailed {
                        status: None,
                        message: other.to_string(),
                    },
                };
                warn!(income_id = %income_id, last_pay = %key, error = %err, "rollover_advance_failed");
                Err(err)
            }
        }
    }
}
