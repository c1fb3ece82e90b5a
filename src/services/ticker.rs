//! Day-change ticker
//!
//! Emits the local date once just after the next local midnight and then on a
//! fixed interval (a day, in production) counted from when the ticker started.
//! The task is owned by [`DayTicker`]; cancelling or dropping the handle aborts
//! it so no scheduled wakeup outlives its owner.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Interval between regular refreshes
pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Offset past midnight for the alignment tick, so "today" has already changed
const MIDNIGHT_SLACK: Duration = Duration::from_secs(1);

/// Time from `now` until one second past the next local midnight
pub fn duration_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let tz = now.timezone();
    let target = now
        .date_naive()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .and_then(|midnight| tz.from_local_datetime(&midnight).earliest());

    match target {
        Some(midnight) => (midnight - now.clone())
            .to_std()
            .map(|d| d + MIDNIGHT_SLACK)
            .unwrap_or(MIDNIGHT_SLACK),
        // Midnight skipped by a DST change; fall back to a full day
        None => DAY,
    }
}

/// Handle to a running day ticker
pub struct DayTicker {
    handle: Option<JoinHandle<()>>,
}

impl DayTicker {
    /// Start ticking on the local clock: midnight alignment plus a daily tick
    pub fn spawn_daily(tx: mpsc::Sender<NaiveDate>) -> Self {
        let alignment = duration_until_next_midnight(&Local::now());
        Self::spawn(DAY, alignment, tx)
    }

    /// Start ticking every `period`, with one extra tick after `alignment`
    ///
    /// Each tick sends the current local date. The task stops on its own when
    /// the receiver is dropped.
    pub fn spawn(period: Duration, alignment: Duration, tx: mpsc::Sender<NaiveDate>) -> Self {
        debug!(
            period_secs = period.as_secs(),
            alignment_secs = alignment.as_secs(),
            "day_ticker_started"
        );

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let align = time::sleep(alignment);
            tokio::pin!(align);
            let mut aligned = false;

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = &mut align, if !aligned => {
                        aligned = true;
                    }
                }

                let today = Local::now().date_naive();
                debug!(refresh_key = %today.format("%m-%d-%Y"), "day_tick");
                if tx.send(today).await.is_err() {
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Stop the ticker; safe to call more than once
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("day_ticker_cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DayTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
