//! Due expense matching
//!
//! Places each expense's due day on the calendar relative to a reference
//! month and keeps the ones that fall inside the pay period.
//!
//! Month selection is a day-of-month heuristic: a due day smaller than the
//! period start's day-of-month belongs to the month after the reference month,
//! anything else to the reference month itself. Only the two day integers are
//! compared; the month the period actually starts in plays no part. Once the
//! target month is known, a due day past its end is resolved with the
//! configured [`DueDayOverflow`] policy.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::settings::DueDayOverflow;
use crate::models::{DueDay, Expense, Money, PayPeriod};

/// An expense due within the pay period, with its concrete due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueExpense {
    pub expense: Expense,
    pub due_date: NaiveDate,
}

/// Expenses due within one pay period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueExpenseSet {
    /// Included expenses, in input order
    pub expenses: Vec<DueExpense>,
    /// Sum of the included amounts
    pub total_due: Money,
}

impl DueExpenseSet {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }
}

fn following_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Number of days in a month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = following_month(year, month);
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some((first_of_next - Duration::days(1)).day())
}

/// Place a day-of-month in a given month under an overflow policy
pub fn resolve_day_in_month(
    year: i32,
    month: u32,
    day: u32,
    overflow: DueDayOverflow,
) -> Option<NaiveDate> {
    match overflow {
        DueDayOverflow::Clamp => {
            let last = days_in_month(year, month)?;
            NaiveDate::from_ymd_opt(year, month, day.min(last))
        }
        DueDayOverflow::Roll => {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            first.checked_add_signed(Duration::days(i64::from(day) - 1))
        }
    }
}

/// Matches expenses against a pay period
#[derive(Debug, Clone, Copy, Default)]
pub struct DueExpenseMatcher {
    overflow: DueDayOverflow,
}

impl DueExpenseMatcher {
    pub fn new(overflow: DueDayOverflow) -> Self {
        Self { overflow }
    }

    /// The concrete date an expense due day resolves to for this period,
    /// anchored on the month of `reference`
    pub fn resolve_due_date(
        &self,
        due_day: DueDay,
        period: &PayPeriod,
        reference: NaiveDate,
    ) -> Option<NaiveDate> {
        let (mut year, mut month) = (reference.year(), reference.month());
        if due_day.get() < period.start.day() {
            (year, month) = following_month(year, month);
        }
        resolve_day_in_month(year, month, due_day.get(), self.overflow)
    }

    /// Select the expenses due within `period`
    ///
    /// `reference` is the evaluation date; only its year and month are used.
    pub fn match_due(
        &self,
        period: &PayPeriod,
        expenses: &[Expense],
        reference: NaiveDate,
    ) -> DueExpenseSet {
        let expenses: Vec<DueExpense> = expenses
            .iter()
            .filter_map(|expense| {
                let due_date = self.resolve_due_date(expense.due_day?, period, reference)?;
                period.contains(due_date).then(|| DueExpense {
                    expense: expense.clone(),
                    due_date,
                })
            })
            .collect();

        let total_due = expenses.iter().map(|due| due.expense.amount).sum();

        DueExpenseSet {
            expenses,
            total_due,
        }
    }
}
