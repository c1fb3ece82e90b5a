//! Expense CLI commands

use clap::Subcommand;

use super::Backend;
use crate::config::settings::Settings;
use crate::display::{format_expense_list, ordinal};
use crate::error::{NextCheckError, NextCheckResult};
use crate::models::{DueDay, ExpenseId, Money};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a recurring monthly expense
    Add {
        /// Expense name
        name: String,
        /// Amount (e.g., "60" or "59.99")
        amount: String,
        /// Day of the month it is due (1-31)
        due_day: u32,
    },

    /// List expenses
    List,

    /// Remove an expense
    Remove {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command
pub async fn handle_expense_command(
    backend: &Backend,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> NextCheckResult<()> {
    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            due_day,
        } => {
            let storage = backend.local()?;
            let amount = Money::parse(&amount)
                .map_err(|e| NextCheckError::Validation(format!("Invalid amount: {}", e)))?;
            let due_day = DueDay::new(due_day).map_err(|e| NextCheckError::Validation(e.to_string()))?;

            let expense = storage.expenses.add(name, amount, due_day)?;
            storage.expenses.save()?;
            println!(
                "Added expense #{}: {} {} due on the {}",
                expense.id,
                expense.name,
                expense.amount.format_with_symbol(&settings.currency_symbol),
                ordinal(due_day.get())
            );
        }

        ExpenseCommands::List => {
            let expenses = backend.expense_store().list_expenses().await?;
            println!("{}", format_expense_list(&expenses, &settings.currency_symbol));
        }

        ExpenseCommands::Remove { id } => {
            let storage = backend.local()?;
            let id: ExpenseId = id
                .parse()
                .map_err(|_| NextCheckError::Validation(format!("Invalid expense ID: {}", id)))?;

            let removed = storage.expenses.remove(id)?;
            storage.expenses.save()?;
            println!("Removed expense #{}: {}", removed.id, removed.name);
        }
    }

    Ok(())
}
