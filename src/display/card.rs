//! Next paycheck card formatting
//!
//! ```text
//! Next Check: Jun 15th for $85.00
//!   Internet: $60.00 on the 10th
//!   Water: $25.00 on the 12th
//! ```

use chrono::{Datelike, NaiveDate};

use crate::models::Money;
use crate::services::{NextCheckReport, NextCheckView};

/// English ordinal for a day number: 1st, 2nd, 3rd, 4th, 11th, 21st...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Abbreviated month and ordinal day, e.g. "Jun 15th"
pub fn format_pay_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), ordinal(date.day()))
}

/// Render the card for a report
pub fn format_card(report: &NextCheckReport, currency_symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(currency_symbol);

    match &report.view {
        NextCheckView::Calculating { .. } => "Next Check: Calculating...\n".to_string(),
        NextCheckView::Ready { period, due } => {
            let mut output = format!(
                "Next Check: {} for {}\n",
                format_pay_date(period.next_pay_date),
                money(due.total_due)
            );
            for item in &due.expenses {
                output.push_str(&format!(
                    "  {}: {} on the {}\n",
                    item.expense.name,
                    money(item.expense.amount),
                    ordinal(
                        item.expense
                            .due_day
                            .map_or_else(|| item.due_date.day(), |day| day.get())
                    )
                ));
            }
            output
        }
    }
}

/// Notes about rollover activity, one per line
pub fn format_rollover_notes(report: &NextCheckReport) -> String {
    let mut output = String::new();
    for date in &report.advanced {
        output.push_str(&format!("Pay date advanced to {}\n", date.format("%Y-%m-%d")));
    }
    if let Some(failure) = &report.failure {
        output.push_str(&format!("Could not advance pay date: {}\n", failure));
    }
    output
}
