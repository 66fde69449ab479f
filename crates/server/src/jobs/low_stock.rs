//! Low-stock restocking job: periodically tops up products under the
//! threshold and logs each adjusted product.

use std::time::Duration;

use sqlx::SqlitePool;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::services::InventoryService;

use super::{Clock, LogSink, stamp_dmy, utc_clock};

/// Log file name for low-stock update lines.
pub const LOG_FILE: &str = "low_stock_updates_log.txt";

/// Runs [`InventoryService::update_low_stock`] on an interval and records
/// an audit block per run.
///
/// The threshold check and the restock update are not one atomic read;
/// two processes running this job concurrently can restock the same
/// product twice.
pub struct LowStockJob {
    inventory: InventoryService,
    sink: LogSink,
    clock: Clock,
    interval: Duration,
}

impl LowStockJob {
    /// Create a low-stock job over `pool`.
    #[must_use]
    pub fn new(pool: SqlitePool, sink: LogSink, interval: Duration) -> Self {
        Self {
            inventory: InventoryService::new(pool),
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
                self.run_once().await;
            }
        })
    }

    /// Executes one restock pass. Failures surface in the outcome message,
    /// never as a panic or error return.
    pub async fn run_once(&self) {
        let timestamp = stamp_dmy((self.clock)());
        let mut lines = vec![format!("[{timestamp}] Low stock update job started")];

        let result = self.inventory.update_low_stock().await;
        lines.push(format!("[{timestamp}] {}", result.message));

        if !result.updated_products.is_empty() {
            lines.push(format!("[{timestamp}] Updated products:"));
            for product in &result.updated_products {
                lines.push(format!(
                    "[{timestamp}] - Product ID {}: {} (New stock: {})",
                    product.id, product.name, product.stock
                ));
            }
        }
        lines.push(String::new());

        info!(count = result.count, "low stock update finished");
        self.sink.append(&lines);
    }
}
