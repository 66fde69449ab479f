//! Heartbeat job: periodic liveness line with a query-surface probe.

use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use super::{Clock, LogSink, stamp_dmy, utc_clock};

/// Log file name for heartbeat lines.
pub const LOG_FILE: &str = "crm_heartbeat_log.txt";

/// Probe error text is truncated to this many characters.
const ERROR_TRUNCATE: usize = 50;

/// Emits `<DD/MM/YYYY-HH:MM:SS> CRM is alive` on a fixed short interval,
/// with a suffix reporting whether a liveness probe against the query
/// surface succeeded, failed logically, or raised an error.
pub struct HeartbeatJob {
    base_url: String,
    client: reqwest::Client,
    sink: LogSink,
    clock: Clock,
    interval: Duration,
}

impl HeartbeatJob {
    /// Create a heartbeat job probing the query surface at `base_url`.
    #[must_use]
    pub fn new(base_url: String, sink: LogSink, interval: Duration) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
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

    /// Executes one heartbeat. Never raises past its boundary.
    pub async fn run_once(&self) {
        let timestamp = stamp_dmy((self.clock)());

        let suffix = match self.probe().await {
            Ok(true) => " - query endpoint responsive".to_owned(),
            Ok(false) => " - query endpoint error".to_owned(),
            Err(e) => {
                let detail: String = e.to_string().chars().take(ERROR_TRUNCATE).collect();
                format!(" - query endpoint check failed: {detail}")
            }
        };

        let line = format!("{timestamp} CRM is alive{suffix}");
        debug!(%line, "heartbeat");
        self.sink.append(std::slice::from_ref(&line));
    }

    /// Hits the query surface's ping endpoint. `Ok(true)` means a healthy
    /// `pong` answer, `Ok(false)` a reachable but unhealthy surface.
    async fn probe(&self) -> Result<bool, reqwest::Error> {
        let url = format!("{}/api/ping", self.base_url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let body = response.text().await?;
        Ok(body.contains("pong"))
    }
}
