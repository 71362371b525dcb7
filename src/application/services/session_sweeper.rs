use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::SessionController;

const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

/// Periodically evicts sessions idle for longer than `max_idle`.
pub struct SessionSweeper {
    controller: Arc<SessionController>,
    max_idle: Duration,
    period: Duration,
}

impl SessionSweeper {
    pub fn new(controller: Arc<SessionController>, max_idle: Duration, period: Duration) -> Self {
        Self {
            controller,
            max_idle,
            period: if period.is_zero() {
                DEFAULT_PERIOD
            } else {
                period
            },
        }
    }

    pub async fn run(self) {
        tracing::info!(
            max_idle_secs = self.max_idle.as_secs(),
            period_secs = self.period.as_secs(),
            "Session sweeper started"
        );
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match self.controller.evict_idle(self.max_idle).await {
                Ok(0) => {}
                Ok(evicted) => tracing::info!(evicted, "Idle sessions evicted"),
                Err(e) => tracing::error!(error = %e, "Session sweep failed"),
            }
        }
    }
}
