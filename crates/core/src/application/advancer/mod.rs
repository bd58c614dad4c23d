// Queue Advancer - background serving loop

pub mod constants;
mod shutdown;

use constants::*;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::error::Result;
use crate::port::{QueueStore, RandomSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Periodically serves the head of every known queue with a fixed probability.
///
/// Models organic throughput only; there is no notion of service duration.
/// Each pop is a single store step, so it never interleaves with a join or
/// leave on the same establishment.
pub struct QueueAdvancer {
    store: Arc<dyn QueueStore>,
    random: Arc<dyn RandomSource>,
    interval: Duration,
    serve_probability: f64,
}

impl QueueAdvancer {
    pub fn new(store: Arc<dyn QueueStore>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            store,
            random,
            interval: DEFAULT_ADVANCE_INTERVAL,
            serve_probability: DEFAULT_SERVE_PROBABILITY,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_serve_probability(mut self, probability: f64) -> Self {
        self.serve_probability = probability;
        self
    }

    /// Run the advancer loop until shutdown
    pub async fn run(&self, mut shutdown: ShutdownToken) -> Result<()> {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            serve_probability = self.serve_probability,
            "Queue advancer started"
        );

        let mut tick = interval(self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick fires immediately; skip it so serving starts one period in
        tick.tick().await;

        loop {
            if shutdown.is_shutdown() {
                break;
            }

            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = self.tick().await {
                        error!(error = %e, "Queue advancer tick failed");
                    }
                }
                _ = shutdown.wait() => {
                    info!("Queue advancer interrupted");
                    break;
                }
            }
        }

        info!("Queue advancer stopped");
        Ok(())
    }

    /// One pass over every known queue. Returns how many parties were served.
    pub async fn tick(&self) -> Result<usize> {
        let mut served = 0;

        for establishment_id in self.store.establishments().await? {
            if !self.random.chance(self.serve_probability) {
                continue;
            }

            if let Some(entry) = self.store.pop_front(&establishment_id).await? {
                served += 1;
                debug!(
                    restaurant_id = %establishment_id,
                    queue_number = entry.queue_number,
                    party_size = entry.party_size,
                    "Served head of queue"
                );
            }
        }

        if served > 0 {
            debug!(served, "Advancer tick complete");
        }

        Ok(served)
    }
}
