// Queue Service - join / leave / status use cases

pub mod join;

pub use join::{JoinRequest, JoinResponse, PartySizePolicy};

use crate::domain::QueueStatusView;
use crate::error::{AppError, Result};
use crate::port::{QueueStore, TimeProvider};
use std::sync::Arc;
use tracing::{debug, info};

/// Operation layer over an injected [`QueueStore`]
pub struct QueueService {
    store: Arc<dyn QueueStore>,
    time_provider: Arc<dyn TimeProvider>,
    party_size_policy: PartySizePolicy,
}

impl QueueService {
    pub fn new(store: Arc<dyn QueueStore>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            store,
            time_provider,
            party_size_policy: PartySizePolicy::default(),
        }
    }

    pub fn with_party_size_policy(mut self, policy: PartySizePolicy) -> Self {
        self.party_size_policy = policy;
        self
    }

    pub fn party_size_policy(&self) -> PartySizePolicy {
        self.party_size_policy
    }

    /// Read-only view of one establishment, from `participant_id`'s point of view.
    ///
    /// A blank participant id is treated as "no participant".
    pub async fn status(
        &self,
        establishment_id: &str,
        participant_id: Option<&str>,
    ) -> Result<QueueStatusView> {
        if establishment_id.trim().is_empty() {
            return Err(AppError::Validation("restaurantId must not be empty".into()));
        }
        let participant_id = participant_id.filter(|id| !id.trim().is_empty());

        let queue = self.store.snapshot(establishment_id).await?;
        let view = QueueStatusView::derive(&queue, participant_id);

        debug!(
            restaurant_id = %establishment_id,
            total = view.total_queue_size,
            people_ahead = view.people_ahead,
            status = %view.current_status,
            "Queue status computed"
        );

        Ok(view)
    }

    /// Join the queue (idempotent per participant)
    pub async fn join(&self, req: JoinRequest) -> Result<JoinResponse> {
        join::execute(
            self.store.as_ref(),
            self.time_provider.as_ref(),
            self.party_size_policy,
            req,
        )
        .await
    }

    /// Leave the queue. Succeeds whether or not the participant was waiting.
    pub async fn leave(&self, establishment_id: &str, participant_id: &str) -> Result<()> {
        join::validate_ids(establishment_id, participant_id)?;

        let removed = self
            .store
            .remove_participant(establishment_id, participant_id)
            .await?;

        if removed {
            info!(restaurant_id = %establishment_id, user_id = %participant_id, "Participant left queue");
        } else {
            debug!(restaurant_id = %establishment_id, user_id = %participant_id, "Leave for absent participant (no-op)");
        }

        Ok(())
    }
}
