//! TickScheduler - Background service keeping the cycle's phase current.
//!
//! The engine's `tick` is level-triggered, so the scheduler only needs to
//! call it periodically. A late or skipped tick lands on the same phase a
//! timely one would have.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 1s | How often the cycle is ticked |
//!
//! ## Graceful Shutdown
//!
//! The scheduler listens on a `watch` channel and stops after the current
//! tick completes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use super::DecisionBoardService;
use crate::domain::decision::DecisionEvent;

/// Configuration for the TickScheduler.
#[derive(Debug, Clone)]
pub struct TickSchedulerConfig {
    pub interval: Duration,
}

impl Default for TickSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

impl TickSchedulerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Periodically ticks the board service.
pub struct TickScheduler {
    service: Arc<DecisionBoardService>,
    config: TickSchedulerConfig,
}

impl TickScheduler {
    pub fn new(service: Arc<DecisionBoardService>, config: TickSchedulerConfig) -> Self {
        Self { service, config }
    }

    /// Run the tick loop until the shutdown signal is received.
    ///
    /// A dropped sender counts as shutdown.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("tick scheduler stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.tick_once().await;
                }
            }
        }
    }

    /// Run exactly one tick. Storage failures are logged and retried on
    /// the next tick.
    pub async fn tick_once(&self) -> Option<DecisionEvent> {
        match self.service.tick().await {
            Ok(event) => event,
            Err(err) => {
                warn!(code = %err.code(), error = %err, "scheduled tick failed");
                None
            }
        }
    }
}
