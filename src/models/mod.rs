//! Core data models for nextcheck
//!
//! Pay cycles and periods, recurring expenses, the income record and the
//! supporting money and ID types.

pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;

pub use expense::{DueDay, Expense, ExpenseValidationError};
pub use ids::{ExpenseId, IncomeId};
pub use income::{IncomeRecord, RecentPayUpdate};
pub use money::Money;
pub use period::{
    parse_pay_date, PayCycle, PayPeriod, DATE_FORMAT, DEFAULT_CYCLE_LENGTH_DAYS, MAX_CYCLE_LENGTH_DAYS,
};
