//! Client-side view reconciliation
//!
//! Keeps one participant's view of one establishment up to date. Each tick
//! either adopts the service's answer or, when the service is unavailable,
//! evolves the last known view locally with [`FallbackSimulator`].

use crate::client::WaitlineClient;
use crate::error::Result;
use crate::reply::ServiceReply;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use waitline_core::application::FallbackSimulator;
use waitline_core::domain::{QueueStatusView, TicketNumber};
use waitline_core::port::RandomSource;

/// How often a client refreshes its view
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Where the current view came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Last update was an authoritative answer from the service
    Live,
    /// Service unavailable; the view is locally simulated
    Simulated,
}

pub struct ClientReconciler {
    client: WaitlineClient,
    simulator: FallbackSimulator,
    restaurant_id: String,
    participant_id: String,
    view: QueueStatusView,
    mode: SyncMode,
    emergency_stop: bool,
}

impl ClientReconciler {
    /// Starts from a synthetic view until the first successful poll
    pub fn new(
        client: WaitlineClient,
        random: Arc<dyn RandomSource>,
        restaurant_id: impl Into<String>,
        participant_id: impl Into<String>,
    ) -> Self {
        let restaurant_id = restaurant_id.into();
        Self {
            client,
            simulator: FallbackSimulator::new(random),
            view: FallbackSimulator::initial_view(&restaurant_id),
            restaurant_id,
            participant_id: participant_id.into(),
            mode: SyncMode::Simulated,
            emergency_stop: false,
        }
    }

    pub fn view(&self) -> &QueueStatusView {
        &self.view
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn emergency_stop(&self) -> bool {
        self.emergency_stop
    }

    /// Operator toggle: while set, simulated queues only drain
    pub fn set_emergency_stop(&mut self, on: bool) {
        self.emergency_stop = on;
    }

    /// One polling step
    pub async fn tick(&mut self) -> Result<SyncMode> {
        let result = self
            .client
            .status(&self.restaurant_id, Some(&self.participant_id))
            .await;

        match ServiceReply::classify(result)? {
            ServiceReply::Authoritative(view) => {
                self.view = view;
                self.mode = SyncMode::Live;
            }
            ServiceReply::Unavailable(e) => {
                debug!(error = %e, restaurant_id = %self.restaurant_id, "Status poll failed, simulating");
                self.view = self.simulator.step(&self.view, self.emergency_stop);
                self.mode = SyncMode::Simulated;
            }
        }

        Ok(self.mode)
    }

    /// Join the queue. Falls back to a provisional local ticket when offline.
    pub async fn join(&mut self, party_size: Option<i64>) -> Result<TicketNumber> {
        let result = self
            .client
            .join(&self.restaurant_id, &self.participant_id, party_size)
            .await;

        match ServiceReply::classify(result)? {
            ServiceReply::Authoritative(queue_number) => {
                self.view = FallbackSimulator::apply_remote_join(&self.view, queue_number);
                self.mode = SyncMode::Live;
                Ok(queue_number)
            }
            ServiceReply::Unavailable(e) => {
                warn!(error = %e, restaurant_id = %self.restaurant_id, "Join failed, queuing locally");
                self.view = self.simulator.local_join(&self.view);
                self.mode = SyncMode::Simulated;
                Ok(self.view.my_queue_number.unwrap_or_default())
            }
        }
    }

    /// Leave the queue. The local ticket is cleared whatever the service says.
    pub async fn leave(&mut self) -> Result<SyncMode> {
        let result = self
            .client
            .leave(&self.restaurant_id, &self.participant_id)
            .await;

        self.view = FallbackSimulator::apply_leave(&self.view);

        match ServiceReply::classify(result)? {
            ServiceReply::Authoritative(()) => self.mode = SyncMode::Live,
            ServiceReply::Unavailable(e) => {
                warn!(error = %e, restaurant_id = %self.restaurant_id, "Leave not confirmed by service");
                self.mode = SyncMode::Simulated;
            }
        }

        Ok(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waitline_core::domain::QueueStatus;
    use waitline_core::port::random_source::mocks::ScriptedRandomSource;
    use waitline_core::port::random_source::ThreadRandomSource;

    fn offline(random: impl RandomSource + 'static) -> ClientReconciler {
        let client =
            WaitlineClient::with_timeout("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        ClientReconciler::new(client, Arc::new(random), "cafe-a", "u1")
    }

    #[tokio::test]
    async fn test_starts_from_synthetic_view() {
        let reconciler = offline(ThreadRandomSource);
        assert_eq!(reconciler.mode(), SyncMode::Simulated);
        assert_eq!(reconciler.view().total_queue_size, 17);
        assert_eq!(reconciler.view().my_queue_number, None);
    }

    #[tokio::test]
    async fn test_offline_tick_simulates() {
        let mut reconciler = offline(ScriptedRandomSource::new(false).with_values([1]));

        assert_eq!(reconciler.tick().await.unwrap(), SyncMode::Simulated);
        assert_eq!(reconciler.view().total_queue_size, 18);
        assert_eq!(reconciler.view().people_ahead, 18);
        assert_eq!(reconciler.view().current_status, QueueStatus::Yellow);
    }

    #[tokio::test]
    async fn test_offline_join_and_leave() {
        let mut reconciler = offline(ScriptedRandomSource::new(false).with_values([155]));

        let ticket = reconciler.join(Some(2)).await.unwrap();
        assert_eq!(ticket, 155);
        assert_eq!(reconciler.mode(), SyncMode::Simulated);
        assert_eq!(reconciler.view().my_queue_number, Some(155));
        assert_eq!(reconciler.view().people_ahead, 18);

        assert_eq!(reconciler.leave().await.unwrap(), SyncMode::Simulated);
        assert_eq!(reconciler.view().my_queue_number, None);
    }

    #[tokio::test]
    async fn test_emergency_stop_never_grows() {
        let mut reconciler = offline(ThreadRandomSource);
        reconciler.set_emergency_stop(true);
        assert!(reconciler.emergency_stop());

        let mut last = reconciler.view().total_queue_size;
        for _ in 0..5 {
            reconciler.tick().await.unwrap();
            let total = reconciler.view().total_queue_size;
            assert!(total <= last);
            last = total;
        }
    }
}
