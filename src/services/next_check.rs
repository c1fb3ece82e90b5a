//! Next paycheck evaluation
//!
//! One evaluation loads the income record and the expense list, advances the
//! stored pay date through any cycles that have already ended, and matches the
//! expenses against the resulting pay period.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::due::{DueExpenseMatcher, DueExpenseSet};
use super::rollover::RolloverAdvancer;
use crate::config::settings::Settings;
use crate::error::NextCheckResult;
use crate::models::{Expense, IncomeRecord, PayPeriod};
use crate::storage::{ExpenseStore, IncomeStore};

/// Upper bound on consecutive advances in one evaluation
const MAX_CATCH_UP_CYCLES: usize = 1024;

/// What the summary card shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NextCheckView {
    /// No usable last pay date yet
    Calculating { reason: String },
    /// Upcoming period and the expenses due in it
    Ready {
        period: PayPeriod,
        due: DueExpenseSet,
    },
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextCheckReport {
    pub view: NextCheckView,
    /// Pay dates the stored last pay date was advanced to, in order
    pub advanced: Vec<NaiveDate>,
    /// Why an advance could not be applied, if it failed
    pub failure: Option<String>,
}

/// Ties the period, matching and rollover steps to the stores
pub struct NextCheckService {
    income: Arc<dyn IncomeStore>,
    expenses: Arc<dyn ExpenseStore>,
    advancer: RolloverAdvancer,
    matcher: DueExpenseMatcher,
    cycle_length_days: u32,
}

impl NextCheckService {
    pub fn new(
        income: Arc<dyn IncomeStore>,
        expenses: Arc<dyn ExpenseStore>,
        settings: &Settings,
    ) -> Self {
        Self {
            advancer: RolloverAdvancer::new(Arc::clone(&income)),
            income,
            expenses,
            matcher: DueExpenseMatcher::new(settings.due_day_overflow),
            cycle_length_days: settings.cycle_length_days,
        }
    }

    /// Load inputs from the stores and evaluate them for `today`
    ///
    /// Only load failures are errors; a missing income record, a missing pay
    /// date or a rejected advance still produce a report.
    pub async fn evaluate(&self, today: NaiveDate) -> NextCheckResult<NextCheckReport> {
        let record = match self.income.get_income().await {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                debug!(error = %e, "next_check_no_income_record");
                return Ok(NextCheckReport {
                    view: NextCheckView::Calculating {
                        reason: e.to_string(),
                    },
                    advanced: Vec::new(),
                    failure: None,
                });
            }
            Err(e) => return Err(e),
        };
        let expenses = self.expenses.list_expenses().await?;
        Ok(self.evaluate_with(record, &expenses, today).await)
    }

    /// Evaluate already-loaded inputs for `today`
    pub async fn evaluate_with(
        &self,
        mut record: IncomeRecord,
        expenses: &[Expense],
        today: NaiveDate,
    ) -> NextCheckReport {
        let mut advanced = Vec::new();
        let mut failure = None;

        let period = loop {
            let derived = record
                .pay_cycle(self.cycle_length_days)
                .and_then(|cycle| Ok((cycle, cycle.period()?)));
            let (cycle, period) = match derived {
                Ok(derived) => derived,
                Err(e) => {
                    debug!(income_id = %record.id, error = %e, "next_check_calculating");
                    return NextCheckReport {
                        view: NextCheckView::Calculating {
                            reason: e.to_string(),
                        },
                        advanced,
                        failure,
                    };
                }
            };

            if advanced.len() >= MAX_CATCH_UP_CYCLES {
                warn!(income_id = %record.id, cycles = advanced.len(), "next_check_catch_up_limit");
                failure = Some(format!(
                    "catch-up limit reached after {} advances; pay date is still behind",
                    advanced.len()
                ));
                break period;
            }

            match self.advancer.evaluate(record.id, &cycle, today).await {
                Ok(Some(updated)) => {
                    advanced.push(period.next_pay_date);
                    record = updated;
                }
                Ok(None) => break period,
                Err(e) => {
                    failure = Some(e.to_string());
                    break period;
                }
            }
        };

        let due = self.matcher.match_due(&period, expenses, today);
        debug!(
            next_pay = %period.next_pay_date,
            due_count = due.len(),
            total_due = %due.total_due,
            "next_check_evaluated"
        );

        NextCheckReport {
            view: NextCheckView::Ready { period, due },
            advanced,
            failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NextCheckError;
    use crate::models::{DueDay, ExpenseId, IncomeId, Money};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: u64, name: &str, cents: i64, due_day: u32) -> Expense {
        Expense::new(
            ExpenseId::new(id),
            name,
            Money::from_cents(cents),
            DueDay::new(due_day).unwrap(),
        )
    }

    struct MemoryStore {
        income: Mutex<IncomeRecord>,
        expenses: Vec<Expense>,
        reject_updates: AtomicBool,
        updates: AtomicUsize,
    }

    impl MemoryStore {
        fn new(recent_pay: Option<&str>, expenses: Vec<Expense>) -> Arc<Self> {
            let mut record = IncomeRecord::new(IncomeId::new(1), Money::from_cents(200000), None);
            record.recent_pay = recent_pay.map(str::to_string);
            Arc::new(Self {
                income: Mutex::new(record),
                expenses,
                reject_updates: AtomicBool::new(false),
                updates: AtomicUsize::new(0),
            })
        }

        fn service(self: &Arc<Self>) -> NextCheckService {
            NextCheckService::new(self.clone(), self.clone(), &Settings::default())
        }
    }

    #[async_trait]
    impl IncomeStore for MemoryStore {
        async fn get_income(&self) -> NextCheckResult<IncomeRecord> {
            Ok(self.income.lock().unwrap().clone())
        }

        async fn update_recent_pay(
            &self,
            _id: IncomeId,
            new_date: NaiveDate,
        ) -> NextCheckResult<IncomeRecord> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            if self.reject_updates.load(Ordering::SeqCst) {
                return Err(NextCheckError::UpdateFailed {
                    status: Some(503),
                    message: "unavailable".into(),
                });
            }
            let mut record = self.income.lock().unwrap();
            record.advance_recent_pay(new_date);
            Ok(record.clone())
        }
    }

    #[async_trait]
    impl ExpenseStore for MemoryStore {
        async fn list_expenses(&self) -> NextCheckResult<Vec<Expense>> {
            Ok(self.expenses.clone())
        }
    }

    #[tokio::test]
    async fn test_ready_view_within_period() {
        let store = MemoryStore::new(
            Some("2024-06-01"),
            vec![expense(1, "Internet", 6000, 10), expense(2, "Gym", 3000, 20)],
        );
        let report = store.service().evaluate(date(2024, 6, 5)).await.unwrap();

        assert!(report.advanced.is_empty());
        assert!(report.failure.is_none());
        match report.view {
            NextCheckView::Ready { period, due } => {
                assert_eq!(period.next_pay_date, date(2024, 6, 15));
                assert_eq!(due.len(), 1);
                assert_eq!(due.total_due, Money::from_cents(6000));
            }
            other => panic!("unexpected view: {:?}", other),
        }
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expense_without_due_day_does_not_block_card() {
        let mut undated = expense(2, "Gift", 4000, 1);
        undated.due_day = None;
        let store = MemoryStore::new(
            Some("2024-06-01"),
            vec![expense(1, "Internet", 6000, 10), undated, expense(3, "Water", 2500, 12)],
        );
        let report = store.service().evaluate(date(2024, 6, 5)).await.unwrap();

        match report.view {
            NextCheckView::Ready { due, .. } => {
                assert_eq!(due.len(), 2);
                assert_eq!(due.total_due, Money::from_cents(8500));
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_catch_up_limit_is_reported() {
        let store = MemoryStore::new(Some("1980-01-01"), vec![]);
        let report = store.service().evaluate(date(2024, 6, 20)).await.unwrap();

        assert_eq!(report.advanced.len(), MAX_CATCH_UP_CYCLES);
        assert!(report
            .failure
            .as_deref()
            .unwrap()
            .contains("catch-up limit reached after 1024 advances"));
        assert_eq!(store.updates.load(Ordering::SeqCst), MAX_CATCH_UP_CYCLES);
        match report.view {
            NextCheckView::Ready { period, .. } => {
                assert!(period.next_pay_date < date(2024, 6, 20));
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pay_date_at_end_of_calendar_shows_calculating() {
        let last_day = NaiveDate::MAX.format(crate::models::DATE_FORMAT).to_string();
        let store = MemoryStore::new(Some(&last_day), vec![]);
        let report = store.service().evaluate(date(2024, 6, 5)).await.unwrap();

        assert!(matches!(report.view, NextCheckView::Calculating { .. }));
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_pay_date_shows_calculating() {
        let store = MemoryStore::new(None, vec![expense(1, "Rent", 100000, 1)]);
        let report = store.service().evaluate(date(2024, 6, 5)).await.unwrap();

        assert!(matches!(report.view, NextCheckView::Calculating { .. }));
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparseable_pay_date_shows_calculating() {
        let store = MemoryStore::new(Some("06-01-2024"), vec![]);
        let report = store.service().evaluate(date(2024, 6, 5)).await.unwrap();

        assert!(matches!(report.view, NextCheckView::Calculating { .. }));
    }

    #[tokio::test]
    async fn test_rollover_advances_then_rederives() {
        let store = MemoryStore::new(Some("2024-06-01"), vec![expense(1, "Phone", 4500, 20)]);
        let report = store.service().evaluate(date(2024, 6, 16)).await.unwrap();

        assert_eq!(report.advanced, vec![date(2024, 6, 15)]);
        match report.view {
            NextCheckView::Ready { period, due } => {
                assert_eq!(period.start, date(2024, 6, 16));
                assert_eq!(period.next_pay_date, date(2024, 6, 29));
                assert_eq!(due.expenses[0].due_date, date(2024, 6, 20));
            }
            other => panic!("unexpected view: {:?}", other),
        }
        assert_eq!(
            store.income.lock().unwrap().recent_pay.as_deref(),
            Some("2024-06-15")
        );
    }

    #[tokio::test]
    async fn test_catches_up_several_missed_cycles() {
        let store = MemoryStore::new(Some("2024-05-04"), vec![]);
        let report = store.service().evaluate(date(2024, 6, 20)).await.unwrap();

        assert_eq!(
            report.advanced,
            vec![date(2024, 5, 18), date(2024, 6, 1), date(2024, 6, 15)]
        );
        assert_eq!(store.updates.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_repeated_evaluation_does_not_resubmit() {
        let store = MemoryStore::new(Some("2024-06-01"), vec![]);
        let service = store.service();

        service.evaluate(date(2024, 6, 16)).await.unwrap();
        let second = service.evaluate(date(2024, 6, 16)).await.unwrap();

        assert!(second.advanced.is_empty());
        assert_eq!(store.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_record_is_not_resubmitted() {
        let store = MemoryStore::new(Some("2024-06-01"), vec![]);
        let service = store.service();
        let stale = store.get_income().await.unwrap();

        service.evaluate(date(2024, 6, 16)).await.unwrap();
        // Host still holds the pre-advance record
        let report = service.evaluate_with(stale, &[], date(2024, 6, 16)).await;

        assert!(report.advanced.is_empty());
        assert_eq!(store.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_period() {
        let store = MemoryStore::new(Some("2024-06-01"), vec![expense(1, "Rent", 100000, 10)]);
        store.reject_updates.store(true, Ordering::SeqCst);

        let report = store.service().evaluate(date(2024, 6, 16)).await.unwrap();

        assert!(report.advanced.is_empty());
        assert!(report.failure.as_deref().unwrap().contains("503"));
        match report.view {
            NextCheckView::Ready { period, due } => {
                assert_eq!(period.next_pay_date, date(2024, 6, 15));
                assert_eq!(due.total_due, Money::from_cents(100000));
            }
            other => panic!("unexpected view: {:?}", other),
        }
        assert_eq!(
            store.income.lock().unwrap().recent_pay.as_deref(),
            Some("2024-06-01")
        );
    }

    #[tokio::test]
    async fn test_missing_income_record_shows_calculating() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = crate::config::NextCheckPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = crate::storage::Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let storage = Arc::new(storage);

        let service = NextCheckService::new(storage.clone(), storage, &Settings::default());
        let report = service.evaluate(date(2024, 6, 5)).await.unwrap();

        assert!(matches!(report.view, NextCheckView::Calculating { .. }));
    }

    #[tokio::test]
    async fn test_report_serializes_with_state_tag() {
        let store = MemoryStore::new(None, vec![]);
        let report = store.service().evaluate(date(2024, 6, 5)).await.unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["view"]["state"], "calculating");
    }
}
