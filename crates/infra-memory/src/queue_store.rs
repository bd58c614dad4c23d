// In-Memory QueueStore Implementation

use crate::seed::SeedConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use waitline_core::domain::{
    EstablishmentId, EstablishmentQueue, JoinOutcome, PartySize, QueueEntry,
};
use waitline_core::error::Result;
use waitline_core::port::{IdProvider, QueueStore, RandomSource, TimeProvider};

type SharedQueue = Arc<Mutex<EstablishmentQueue>>;

/// Process-lifetime registry of establishment queues.
///
/// The map lock is only held to look up or insert a queue handle; all work on
/// a queue happens under that queue's own mutex, so establishments never
/// contend with each other.
pub struct InMemoryQueueStore {
    queues: RwLock<HashMap<EstablishmentId, SharedQueue>>,
    seed: SeedConfig,
    random: Arc<dyn RandomSource>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl InMemoryQueueStore {
    pub fn new(
        seed: SeedConfig,
        random: Arc<dyn RandomSource>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            queues: RwLock::new(HashMap::new()),
            seed,
            random,
            id_provider,
            time_provider,
        }
    }

    pub fn seed_config(&self) -> SeedConfig {
        self.seed
    }

    async fn existing(&self, establishment_id: &str) -> Option<SharedQueue> {
        self.queues.read().await.get(establishment_id).cloned()
    }

    /// Handle to the queue, creating and seeding it exactly once
    async fn get_or_create(&self, establishment_id: &str) -> SharedQueue {
        if let Some(queue) = self.existing(establishment_id).await {
            return queue;
        }

        let mut queues = self.queues.write().await;
        // Re-check: another task may have created it between the two locks
        if let Some(queue) = queues.get(establishment_id) {
            return queue.clone();
        }

        let queue = self.seed.seeded_queue(
            establishment_id,
            self.random.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
        );
        info!(
            restaurant_id = %establishment_id,
            seeded = queue.len(),
            "Created establishment queue"
        );

        let queue = Arc::new(Mutex::new(queue));
        queues.insert(establishment_id.to_string(), queue.clone());
        queue
    }
}

#[async_trait]
impl QueueStore for InMemoryQueueStore {
    async fn snapshot(&self, establishment_id: &str) -> Result<EstablishmentQueue> {
        let queue = self.get_or_create(establishment_id).await;
        let guard = queue.lock().await;
        Ok(guard.clone())
    }

    async fn join(
        &self,
        establishment_id: &str,
        participant_id: &str,
        party_size: PartySize,
        joined_at: i64,
    ) -> Result<JoinOutcome> {
        let queue = self.get_or_create(establishment_id).await;
        let mut guard = queue.lock().await;
        Ok(guard.join(participant_id, party_size, joined_at))
    }

    async fn remove_participant(
        &self,
        establishment_id: &str,
        participant_id: &str,
    ) -> Result<bool> {
        let queue = self.get_or_create(establishment_id).await;
        let mut guard = queue.lock().await;
        Ok(guard.remove_participant(participant_id))
    }

    async fn pop_front(&self, establishment_id: &str) -> Result<Option<QueueEntry>> {
        let Some(queue) = self.existing(establishment_id).await else {
            debug!(restaurant_id = %establishment_id, "pop_front on unknown establishment");
            return Ok(None);
        };

        let mut guard = queue.lock().await;
        Ok(guard.pop_front())
    }

    async fn establishments(&self) -> Result<Vec<EstablishmentId>> {
        let mut ids: Vec<_> = self.queues.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tokio::task::JoinSet;
    use waitline_core::domain::FIRST_TICKET_NUMBER;
    use waitline_core::port::id_provider::mocks::SequentialIdProvider;
    use waitline_core::port::random_source::mocks::ScriptedRandomSource;
    use waitline_core::port::random_source::ThreadRandomSource;
    use waitline_core::port::time_provider::mocks::FixedTimeProvider;

    fn store(seed: SeedConfig, random: impl RandomSource + 'static) -> InMemoryQueueStore {
        InMemoryQueueStore::new(
            seed,
            Arc::new(random),
            Arc::new(SequentialIdProvider::default()),
            Arc::new(FixedTimeProvider::new(1_700_000_000_000)),
        )
    }

    fn empty_store() -> Arc<InMemoryQueueStore> {
        Arc::new(store(SeedConfig::empty(), ThreadRandomSource))
    }

    #[tokio::test]
    async fn test_lazy_creation_seeds_once() {
        let store = store(
            SeedConfig::default(),
            ScriptedRandomSource::new(false).with_values([5]),
        );

        let first = store.snapshot("cafe-a").await.unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first.next_ticket_number(), FIRST_TICKET_NUMBER + 5);
        assert!(first.entries().all(|e| e.participant_id.starts_with("dummy-")));

        // Second access must not reseed
        let second = store.snapshot("cafe-a").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.establishments().await.unwrap(), vec!["cafe-a".to_string()]);
    }

    #[tokio::test]
    async fn test_seed_count_within_range() {
        let store = store(SeedConfig::default(), ThreadRandomSource);
        for i in 0..20 {
            let queue = store.snapshot(&format!("r{}", i)).await.unwrap();
            assert!((3..=7).contains(&queue.len()));
            assert_eq!(
                queue.next_ticket_number(),
                FIRST_TICKET_NUMBER + queue.len() as u64
            );
            assert_eq!(queue.current_number(), 100);
        }
    }

    #[tokio::test]
    async fn test_join_after_seed_continues_numbering() {
        let store = store(
            SeedConfig::default(),
            ScriptedRandomSource::new(false).with_values([3]),
        );

        let outcome = store.join("cafe-a", "u1", 2, 0).await.unwrap();
        assert_eq!(outcome, JoinOutcome::Joined(104));

        let queue = store.snapshot("cafe-a").await.unwrap();
        assert_eq!(queue.position_of("u1"), Some(3));
    }

    #[tokio::test]
    async fn test_pop_front_does_not_create() {
        let store = empty_store();
        assert_eq!(store.pop_front("ghost").await.unwrap(), None);
        assert!(store.establishments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_pop() {
        let store = empty_store();
        store.join("cafe-a", "u1", 1, 0).await.unwrap();
        store.join("cafe-a", "u2", 1, 0).await.unwrap();

        assert!(store.remove_participant("cafe-a", "u1").await.unwrap());
        assert!(!store.remove_participant("cafe-a", "u1").await.unwrap());

        let served = store.pop_front("cafe-a").await.unwrap().unwrap();
        assert_eq!(served.participant_id, "u2");
        assert_eq!(served.queue_number, 102);

        let queue = store.snapshot("cafe-a").await.unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.current_number(), 102);
        assert_eq!(store.pop_front("cafe-a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_first_access_creates_one_queue() {
        let store = Arc::new(store(SeedConfig::default(), ThreadRandomSource));

        let mut tasks = JoinSet::new();
        for _ in 0..32 {
            let store = store.clone();
            tasks.spawn(async move { store.snapshot("busy").await.unwrap() });
        }

        let mut snapshots = Vec::new();
        while let Some(res) = tasks.join_next().await {
            snapshots.push(res.unwrap());
        }

        // All observers saw the same seeded queue
        assert!(snapshots.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.establishments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_joins_get_unique_tickets() {
        let store = empty_store();

        let mut tasks = JoinSet::new();
        for i in 0..100 {
            let store = store.clone();
            tasks.spawn(async move {
                store
                    .join("cafe-a", &format!("u{}", i), 1, 0)
                    .await
                    .unwrap()
                    .queue_number()
            });
        }

        let mut tickets = HashSet::new();
        while let Some(res) = tasks.join_next().await {
            assert!(tickets.insert(res.unwrap()));
        }

        assert_eq!(tickets.len(), 100);
        assert_eq!(*tickets.iter().min().unwrap(), 101);
        assert_eq!(*tickets.iter().max().unwrap(), 200);

        let queue = store.snapshot("cafe-a").await.unwrap();
        assert_eq!(queue.len(), 100);
        assert_eq!(queue.next_ticket_number(), 201);
    }

    #[tokio::test]
    async fn test_duplicate_concurrent_joins_keep_one_entry() {
        let store = empty_store();

        let results = futures::future::join_all(
            (0..16).map(|_| store.join("cafe-a", "same-user", 3, 0)),
        )
        .await;

        let numbers: HashSet<_> = results
            .into_iter()
            .map(|r| r.unwrap().queue_number())
            .collect();
        assert_eq!(numbers.len(), 1);

        let queue = store.snapshot("cafe-a").await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_ticket_number(), 102);
    }

    #[tokio::test]
    async fn test_pops_interleaved_with_joins_keep_current_monotonic() {
        let store = empty_store();
        for i in 0..50 {
            store.join("cafe-a", &format!("u{}", i), 1, 0).await.unwrap();
        }

        let mut tasks = JoinSet::new();
        for i in 50..80 {
            let store = store.clone();
            tasks.spawn(async move {
                store.join("cafe-a", &format!("u{}", i), 1, 0).await.unwrap();
            });
        }
        for _ in 0..30 {
            let store = store.clone();
            tasks.spawn(async move {
                store.pop_front("cafe-a").await.unwrap();
            });
        }
        while let Some(res) = tasks.join_next().await {
            res.unwrap();
        }

        let queue = store.snapshot("cafe-a").await.unwrap();
        assert_eq!(queue.len(), 50);
        assert_eq!(queue.next_ticket_number(), 181);
        // FIFO: the 30 oldest tickets were served
        assert_eq!(queue.current_number(), 130);

        let tickets: Vec<_> = queue.entries().map(|e| e.queue_number).collect();
        assert!(tickets.windows(2).all(|w| w[0] < w[1]));
    }
}
