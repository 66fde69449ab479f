//! Order reminder command.
//!
//! Meant to run from cron. A failed pass logs an `ERROR:` line and exits
//! nonzero so the scheduler can alert on it.

use tracing::info;

use brightdesk_server::jobs::{LogSink, OrderReminderJob, reminders};

/// Process order reminders for the last seven days.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database is
/// unreachable, or the reminder query fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, pool) = super::connect().await?;

    let sink = LogSink::for_job(reminders::LOG_FILE, &config.base_dir);
    let count = OrderReminderJob::new(pool, sink).run_once().await?;

    info!(count, "Order reminders processed");
    Ok(())
}
