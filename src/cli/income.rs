//! Income CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::Backend;
use crate::config::settings::Settings;
use crate::display::{format_income, format_pay_date};
use crate::error::{NextCheckError, NextCheckResult};
use crate::models::{Money, DATE_FORMAT};
use crate::services::PeriodService;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Show the income record and its current pay period
    Show,

    /// Set the most recent pay date
    SetPay {
        /// Pay date (YYYY-MM-DD)
        date: String,
    },

    /// Set the paycheck amount
    SetAmount {
        /// Amount (e.g., "2150" or "2150.00")
        amount: String,
    },
}

/// Handle an income command
pub async fn handle_income_command(
    backend: &Backend,
    settings: &Settings,
    cmd: IncomeCommands,
) -> NextCheckResult<()> {
    match cmd {
        IncomeCommands::Show => {
            let record = backend.income_store().get_income().await?;
            print!("{}", format_income(&record, &settings.currency_symbol));

            let period_service = PeriodService::new(settings);
            match period_service.derive_from_str(record.recent_pay.as_deref()) {
                Ok(period) => {
                    println!("  Period:      {}", period);
                    println!("  Next check:  {}", format_pay_date(period.next_pay_date));
                }
                Err(e) => println!("  Period:      unavailable ({})", e),
            }
        }

        IncomeCommands::SetPay { date } => {
            let storage = backend.local()?;
            let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
                NextCheckError::Validation(format!("Invalid pay date '{}': {}", date, e))
            })?;

            let record = storage.income.set_recent_pay(date)?;
            storage.income.save()?;
            println!(
                "Most recent pay date set to {}",
                record.recent_pay.as_deref().unwrap_or_default()
            );
        }

        IncomeCommands::SetAmount { amount } => {
            let storage = backend.local()?;
            let amount = Money::parse(&amount)
                .map_err(|e| NextCheckError::Validation(format!("Invalid amount: {}", e)))?;
            if amount.is_negative() {
                return Err(NextCheckError::Validation(
                    "Paycheck amount cannot be negative".into(),
                ));
            }

            let record = storage.income.set_amount(amount)?;
            storage.income.save()?;
            println!(
                "Paycheck amount set to {}",
                record.amount.format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}
