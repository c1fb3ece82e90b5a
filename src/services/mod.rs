//! Service layer for nextcheck
//!
//! Period derivation, due expense matching and pay date rollover, plus the
//! evaluation that strings them together and the day ticker that re-runs it.

pub mod due;
pub mod next_check;
pub mod period;
pub mod rollover;
pub mod ticker;

pub use due::{DueExpense, DueExpenseMatcher, DueExpenseSet};
pub use next_check::{NextCheckReport, NextCheckService, NextCheckView};
pub use period::PeriodService;
pub use rollover::{maybe_advance, AdvanceRequest, RolloverAdvancer};
pub use ticker::DayTicker;
