//! Scheduled maintenance jobs.
//!
//! Each job owns a `run_once` body and (except the CLI-driven reminder
//! job) an interval loop started with `spawn`. The loop awaits `run_once`
//! before the next tick, so a single process never overlaps runs of the
//! same job; nothing prevents overlap across processes, which is a known
//! hazard of the low-stock job.
//!
//! Jobs write their audit trails to append-only log files through
//! [`LogSink`], falling back to a configurable directory and finally to
//! stdout when the primary path is unwritable.

pub mod heartbeat;
pub mod log_sink;
pub mod low_stock;
pub mod reminders;
pub mod report;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use heartbeat::HeartbeatJob;
pub use log_sink::LogSink;
pub use low_stock::LowStockJob;
pub use reminders::OrderReminderJob;
pub use report::ReportJob;

/// Injectable clock; production jobs use [`Utc::now`].
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Default clock.
pub(crate) fn utc_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Heartbeat/low-stock timestamp: `DD/MM/YYYY-HH:MM:SS`.
pub(crate) fn stamp_dmy(now: DateTime<Utc>) -> String {
    now.format("%d/%m/%Y-%H:%M:%S").to_string()
}

/// Reminder/report timestamp: `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn stamp_ymd(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}
