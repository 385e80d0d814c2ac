use fabric_dns_application::ports::{RefreshOutcome, SnapshotRefresh};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;

/// Polls the bootstrap snapshot for changes on a fixed interval. An
/// interval of zero loads the snapshot once and returns, for deployments
/// where the file never changes after install.
pub struct SnapshotRefreshJob {
    snapshot: Arc<dyn SnapshotRefresh>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl SnapshotRefreshJob {
    pub fn new(snapshot: Arc<dyn SnapshotRefresh>) -> Self {
        Self {
            snapshot,
            interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting bootstrap snapshot refresh job"
        );

        self.run_cycle().await;

        if self.interval_secs == 0 {
            info!("SnapshotRefreshJob: one-shot load complete");
            return;
        }

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        // A refresh that outlasts the interval must not be followed by a
        // burst of catch-up refreshes.
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval.tick().await;
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("SnapshotRefreshJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }

    async fn run_cycle(&self) {
        match self.snapshot.refresh().await {
            Ok(RefreshOutcome::Unchanged) => {}
            Ok(RefreshOutcome::Reloaded { records }) => {
                info!(records, "Bootstrap snapshot reloaded");
            }
            Err(e) => {
                error!(error = %e, "Bootstrap snapshot refresh failed");
            }
        }
    }
}
