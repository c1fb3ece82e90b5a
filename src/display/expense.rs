//! Expense and income display formatting

use crate::models::{Expense, IncomeRecord};

use super::card::ordinal;

/// Format the expense list as a table
pub fn format_expense_list(expenses: &[Expense], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let name_width = expenses
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:>12}  {}\n",
        "ID",
        "Name",
        "Amount",
        "Due",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:->12}  {:-<4}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>12}  {}\n",
            expense.id.get(),
            expense.name,
            expense.amount.format_with_symbol(currency_symbol),
            expense
                .due_day
                .map(|day| ordinal(day.get()))
                .unwrap_or_else(|| "-".to_string()),
            name_width = name_width,
        ));
    }

    output
}

/// Format the income record
pub fn format_income(record: &IncomeRecord, currency_symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Income #{}\n", record.id));
    output.push_str(&format!(
        "  Amount:      {}\n",
        record.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "  Recent pay:  {}\n",
        record.recent_pay.as_deref().unwrap_or("(not set)")
    ));
    if let Some(last_pay) = &record.last_pay {
        output.push_str(&format!("  Last pay:    {}\n", last_pay));
    }
    output
}
