use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::configs::Sweeper;
use crate::services::RegistryService;

/// Background eviction of devices that stopped refreshing themselves.
pub struct SweeperService {
    registry_service: Arc<RegistryService>,
    staleness_threshold: Duration,
    poll_interval: Duration,
}

/// Handle on a running sweeper task.
pub struct SweeperHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Requests a stop and waits for the current cycle to finish.
    pub async fn stop(self) {
        self.token.cancel();

        if let Err(e) = self.task.await {
            tracing::error!("Sweeper task failed: {}", e);
        }
    }
}

impl SweeperService {
    pub fn new(registry_service: Arc<RegistryService>, settings: &Sweeper) -> Self {
        Self::with_intervals(
            registry_service,
            settings.staleness_threshold(),
            settings.poll_interval(),
        )
    }

    pub fn with_intervals(
        registry_service: Arc<RegistryService>,
        staleness_threshold: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            registry_service,
            staleness_threshold,
            poll_interval,
        }
    }

    /// Spawns the sweep loop; it runs until `token` is cancelled.
    pub fn start(self, token: CancellationToken) -> SweeperHandle {
        let task = tokio::spawn({
            let token = token.clone();
            async move { self.run(token).await }
        });

        SweeperHandle { token, task }
    }

    async fn run(&self, token: CancellationToken) {
        tracing::info!(
            staleness_threshold = ?self.staleness_threshold,
            poll_interval = ?self.poll_interval,
            "device sweeper running"
        );

        while !token.is_cancelled() {
            self.sweep().await;

            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        tracing::info!("device sweeper stopped");
    }

    /// Runs one cycle. A failed write skips the cycle; the next one retries.
    pub async fn sweep(&self) -> Vec<String> {
        let now = OffsetDateTime::now_utc();

        match self
            .registry_service
            .evict_stale(now, self.staleness_threshold)
            .await
        {
            Ok(evicted) => {
                if !evicted.is_empty() {
                    tracing::warn!(count = evicted.len(), devices = ?evicted, "evicted stale devices");
                }
                evicted
            }
            Err(e) => {
                tracing::error!("Sweep skipped: {}", e);
                Vec::new()
            }
        }
    }
}
