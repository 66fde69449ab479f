//! Order reminder job: logs every order placed within the lookback
//! window. Driven from the CLI rather than an in-process interval so its
//! outcome can map onto a process exit code.

use sqlx::SqlitePool;
use tracing::info;

use crate::db::{OrderRepository, RepositoryError};

use super::{Clock, LogSink, stamp_ymd, utc_clock};

/// Log file name for reminder lines.
pub const LOG_FILE: &str = "order_reminders_log.txt";

/// How far back the reminder window reaches.
const LOOKBACK_DAYS: i64 = 7;

/// Scans recent orders and appends one reminder line per order.
pub struct OrderReminderJob {
    pool: SqlitePool,
    sink: LogSink,
    clock: Clock,
}

impl OrderReminderJob {
    /// Create a reminder job over `pool`.
    #[must_use]
    pub fn new(pool: SqlitePool, sink: LogSink) -> Self {
        Self {
            pool,
            sink,
            clock: utc_clock(),
        }
    }

    /// Overrides the clock used for timestamps and the lookback cutoff.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Processes one reminder pass and returns the number of orders seen.
    ///
    /// # Errors
    ///
    /// Returns the repository error after logging an `ERROR:` line, so the
    /// caller can turn the failure into a nonzero exit code.
    pub async fn run_once(&self) -> Result<usize, RepositoryError> {
        let now = (self.clock)();
        let timestamp = stamp_ymd(now);
        let cutoff = now - chrono::Duration::days(LOOKBACK_DAYS);

        let orders = match OrderRepository::new(&self.pool).list_since(cutoff).await {
            Ok(orders) => orders,
            Err(e) => {
                self.sink.append(&[format!(
                    "[{timestamp}] ERROR: Failed to process order reminders: {e}"
                )]);
                return Err(e);
            }
        };

        let mut lines = vec![format!("[{timestamp}] Order reminders processed:")];
        if orders.is_empty() {
            lines.push(format!(
                "[{timestamp}] No pending orders found in the last {LOOKBACK_DAYS} days."
            ));
        } else {
            for order in &orders {
                lines.push(format!(
                    "[{timestamp}] Order ID: {}, Customer: {} ({}), Date: {}, Amount: ${}",
                    order.id,
                    order.customer_name,
                    order.customer_email,
                    order.order_date.to_rfc3339(),
                    order.total_amount
                ));
            }
        }
        lines.push(format!(
            "[{timestamp}] Total orders processed: {}",
            orders.len()
        ));
        lines.push(String::new());

        info!(count = orders.len(), "order reminders processed");
        self.sink.append(&lines);
        Ok(orders.len())
    }
}
