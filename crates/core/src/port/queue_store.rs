// Queue Store Port (Interface)

use crate::domain::{EstablishmentId, EstablishmentQueue, JoinOutcome, PartySize, QueueEntry};
use crate::error::Result;
use async_trait::async_trait;

/// Registry of establishment queues.
///
/// Every method runs as one exclusive step on a single establishment: a
/// `join` can never interleave with a `pop_front` or `remove_participant`
/// on the same queue. Different establishments never block each other.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Copy of the queue, lazily creating (and seeding) it on first access
    async fn snapshot(&self, establishment_id: &str) -> Result<EstablishmentQueue>;

    /// Find-or-append the participant (creates the queue if needed)
    async fn join(
        &self,
        establishment_id: &str,
        participant_id: &str,
        party_size: PartySize,
        joined_at: i64,
    ) -> Result<JoinOutcome>;

    /// Remove the participant if waiting. Returns whether an entry was removed.
    async fn remove_participant(&self, establishment_id: &str, participant_id: &str)
        -> Result<bool>;

    /// Serve the head of a known queue. Unknown establishments are not created.
    async fn pop_front(&self, establishment_id: &str) -> Result<Option<QueueEntry>>;

    /// Ids of every queue created so far
    async fn establishments(&self) -> Result<Vec<EstablishmentId>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// Unseeded single-lock store for core unit tests
    #[derive(Default)]
    pub struct SimpleQueueStore {
        queues: Mutex<HashMap<EstablishmentId, EstablishmentQueue>>,
    }

    impl SimpleQueueStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl QueueStore for SimpleQueueStore {
        async fn snapshot(&self, establishment_id: &str) -> Result<EstablishmentQueue> {
            let mut queues = self.queues.lock().await;
            Ok(queues
                .entry(establishment_id.to_string())
                .or_insert_with(|| EstablishmentQueue::new(establishment_id))
                .clone())
        }

        async fn join(
            &self,
            establishment_id: &str,
            participant_id: &str,
            party_size: PartySize,
            joined_at: i64,
        ) -> Result<JoinOutcome> {
            let mut queues = self.queues.lock().await;
            Ok(queues
                .entry(establishment_id.to_string())
                .or_insert_with(|| EstablishmentQueue::new(establishment_id))
                .join(participant_id, party_size, joined_at))
        }

        async fn remove_participant(
            &self,
            establishment_id: &str,
            participant_id: &str,
        ) -> Result<bool> {
            let mut queues = self.queues.lock().await;
            Ok(queues
                .entry(establishment_id.to_string())
                .or_insert_with(|| EstablishmentQueue::new(establishment_id))
                .remove_participant(participant_id))
        }

        async fn pop_front(&self, establishment_id: &str) -> Result<Option<QueueEntry>> {
            let mut queues = self.queues.lock().await;
            Ok(queues
                .get_mut(establishment_id)
                .and_then(|queue| queue.pop_front()))
        }

        async fn establishments(&self) -> Result<Vec<EstablishmentId>> {
            let queues = self.queues.lock().await;
            let mut ids: Vec<_> = queues.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        }
    }
}
