//! Next paycheck CLI commands
//!
//! `show` evaluates once; `watch` re-evaluates whenever the local date changes.

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::Backend;
use crate::config::settings::Settings;
use crate::display::{format_card, format_rollover_notes};
use crate::error::NextCheckResult;
use crate::services::{DayTicker, NextCheckService};

fn service_for(backend: &Backend, settings: &Settings) -> NextCheckService {
    NextCheckService::new(backend.income_store(), backend.expense_store(), settings)
}

/// Evaluate and print the card once
pub async fn handle_show_command(
    backend: &Backend,
    settings: &Settings,
    json: bool,
) -> NextCheckResult<()> {
    let service = service_for(backend, settings);
    let report = service.evaluate(Local::now().date_naive()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_rollover_notes(&report));
        print!("{}", format_card(&report, &settings.currency_symbol));
    }

    Ok(())
}

/// Print the card, then again after every day change until Ctrl-C
pub async fn handle_watch_command(backend: &Backend, settings: &Settings) -> NextCheckResult<()> {
    let service = service_for(backend, settings);

    let (tx, mut rx) = mpsc::channel(4);
    let mut ticker = DayTicker::spawn_daily(tx);

    let mut today = Local::now().date_naive();
    loop {
        match service.evaluate(today).await {
            Ok(report) => {
                print!("{}", format_rollover_notes(&report));
                print!("{}", format_card(&report, &settings.currency_symbol));
            }
            // Keep watching; the next tick retries the load
            Err(e) => warn!(error = %e, "watch_evaluation_failed"),
        }

        tokio::select! {
            tick = rx.recv() => match tick {
                Some(date) => today = date,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("watch_interrupted");
                break;
            }
        }
    }

    ticker.cancel();
    Ok(())
}
