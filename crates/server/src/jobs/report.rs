//! Weekly report job: one summary line with customer count, order count
//! and accumulated revenue.

use std::time::Duration;

use sqlx::SqlitePool;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::db::{CustomerRepository, OrderRepository, RepositoryError};

use super::{Clock, LogSink, stamp_ymd, utc_clock};

/// Log file name for report lines.
pub const LOG_FILE: &str = "crm_report_log.txt";

/// Aggregates totals across the whole database and appends a one-line
/// summary per run.
pub struct ReportJob {
    pool: SqlitePool,
    sink: LogSink,
    clock: Clock,
    interval: Duration,
}

impl ReportJob {
    /// Create a report job over `pool`.
    #[must_use]
    pub fn new(pool: SqlitePool, sink: LogSink, interval: Duration) -> Self {
        Self {
            pool,
            sink,
            clock: utc_clock(),
            interval,
        }
    }

    /// Overrides the clock used for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Runs the job loop in the background.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    warn!(error = %e, "report generation failed");
                }
            }
        })
    }

    /// Generates and appends one report line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if either aggregate query fails.
    pub async fn run_once(&self) -> Result<(), RepositoryError> {
        let timestamp = stamp_ymd((self.clock)());

        let customers = CustomerRepository::new(&self.pool).count().await?;
        let (orders, revenue) = OrderRepository::new(&self.pool).count_and_revenue().await?;

        let line = format!(
            "{timestamp} - Report: {customers} customers, {orders} orders, {revenue} revenue"
        );
        info!(%line, "report generated");
        self.sink.append(std::slice::from_ref(&line));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_pool;
    use crate::db::{NewCustomer, NewOrder, ProductRepository};
    use brightdesk_core::Email;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    #[tokio::test]
    async fn reports_counts_and_revenue() {
        let pool = setup_pool().await;
        let email = Email::parse("report@example.com").expect("email");
        let customer = CustomerRepository::new(&pool)
            .insert(NewCustomer {
                name: "Rhea",
                email: &email,
                phone: None,
            })
            .await
            .expect("customer");
        let product = ProductRepository::new(&pool)
            .insert("Widget", Decimal::from_str("4.50").expect("decimal"), 2)
            .await
            .expect("product");

        let orders = OrderRepository::new(&pool);
        for total in ["4.50", "9.00"] {
            orders
                .create(NewOrder {
                    customer_id: customer.id,
                    product_ids: &[product.id],
                    order_date: Utc::now(),
                    total: Decimal::from_str(total).expect("decimal"),
                })
                .await
                .expect("order");
        }

        let dir = tempfile::tempdir().expect("tempdir");
        let log = dir.path().join(LOG_FILE);
        let sink = LogSink::new(&log, dir.path().join("fallback.txt"));

        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).single().expect("valid");
        let job = ReportJob::new(pool, sink, Duration::from_secs(604_800))
            .with_clock(Arc::new(move || at));
        job.run_once().await.expect("report");

        let content = std::fs::read_to_string(&log).expect("log readable");
        assert_eq!(
            content.trim_end(),
            "2024-03-07 09:05:02 - Report: 1 customers, 2 orders, 13.50 revenue"
        );
    }
}
