//! Display formatting for terminal output

pub mod card;
pub mod expense;

pub use card::{format_card, format_pay_date, format_rollover_notes, ordinal};
pub use expense::{format_expense_list, format_income};
