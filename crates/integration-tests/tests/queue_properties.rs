//! Queue Property Tests
//!
//! Ticketing, position and status behaviour of the full core + in-memory stack.

use std::sync::Arc;

use waitline_core::application::queue::JoinRequest;
use waitline_core::application::{QueueAdvancer, QueueService};
use waitline_core::domain::{estimate_wait_minutes, QueueStatus, FIRST_TICKET_NUMBER};
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::random_source::ThreadRandomSource;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::QueueStore;
use waitline_infra_memory::{InMemoryQueueStore, SeedConfig};

fn stack(seed: SeedConfig) -> (Arc<InMemoryQueueStore>, QueueService) {
    let time = Arc::new(SystemTimeProvider);
    let store = Arc::new(InMemoryQueueStore::new(
        seed,
        Arc::new(ThreadRandomSource),
        Arc::new(UuidProvider),
        time.clone(),
    ));
    let service = QueueService::new(store.clone(), time);
    (store, service)
}

fn req(restaurant: &str, user: &str, party_size: Option<i64>) -> JoinRequest {
    JoinRequest {
        establishment_id: restaurant.to_string(),
        participant_id: user.to_string(),
        party_size,
    }
}

/// u1 joins, u2 joins, u1 leaves
#[tokio::test]
async fn test_cafe_a_scenario() {
    let (_, service) = stack(SeedConfig::empty());

    let u1 = service.join(req("cafe-a", "u1", Some(2))).await.unwrap();
    assert_eq!(u1.queue_number, 101);

    let view = service.status("cafe-a", Some("u1")).await.unwrap();
    assert_eq!(view.my_queue_number, Some(101));
    assert_eq!(view.people_ahead, 0);
    assert_eq!(view.total_queue_size, 1);
    assert_eq!(view.current_status, QueueStatus::Green);

    let u2 = service.join(req("cafe-a", "u2", None)).await.unwrap();
    assert_eq!(u2.queue_number, 102);
    assert_eq!(service.status("cafe-a", Some("u1")).await.unwrap().people_ahead, 0);
    assert_eq!(service.status("cafe-a", Some("u2")).await.unwrap().people_ahead, 1);

    service.leave("cafe-a", "u1").await.unwrap();
    let view = service.status("cafe-a", Some("u2")).await.unwrap();
    assert_eq!(view.people_ahead, 0);
    assert_eq!(view.total_queue_size, 1);

    println!("✅ cafe-a scenario");
}

#[tokio::test]
async fn test_people_ahead_equals_index() {
    let (store, service) = stack(SeedConfig::default());

    for i in 0..12 {
        service.join(req("hall", &format!("p{}", i), None)).await.unwrap();
    }

    let queue = store.snapshot("hall").await.unwrap();
    for (index, entry) in queue.entries().enumerate() {
        let view = service
            .status("hall", Some(&entry.participant_id))
            .await
            .unwrap();
        assert_eq!(view.people_ahead as usize, index);
        assert_eq!(view.my_queue_number, Some(entry.queue_number));
        assert_eq!(view.total_queue_size as usize, queue.len());
        assert_eq!(view.estimated_wait_time_minutes, estimate_wait_minutes(index as u32));
    }
}

#[tokio::test]
async fn test_tickets_unique_and_monotonic_across_churn() {
    let (store, service) = stack(SeedConfig::default());
    let seeded = store.snapshot("canteen").await.unwrap();
    let seed_count = seeded.len() as u64;
    assert_eq!(seeded.next_ticket_number(), FIRST_TICKET_NUMBER + seed_count);

    let mut last = 0;
    for i in 0..30 {
        let user = format!("u{}", i);
        let res = service.join(req("canteen", &user, Some(1))).await.unwrap();
        assert!(res.queue_number > last);
        last = res.queue_number;

        // Leaving never hands a number back
        if i % 3 == 0 {
            service.leave("canteen", &user).await.unwrap();
        }
    }
    assert_eq!(last, FIRST_TICKET_NUMBER + seed_count + 29);

    let queue = store.snapshot("canteen").await.unwrap();
    let mut ids: Vec<_> = queue.entries().map(|e| e.participant_id.clone()).collect();
    let before = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[tokio::test]
async fn test_idempotent_join_and_leave() {
    let (_, service) = stack(SeedConfig::default());

    let first = service.join(req("cafe-b", "u1", Some(3))).await.unwrap();
    let total = service.status("cafe-b", None).await.unwrap().total_queue_size;

    let again = service.join(req("cafe-b", "u1", Some(3))).await.unwrap();
    assert_eq!(first.queue_number, again.queue_number);
    assert!(!again.newly_joined);
    assert_eq!(service.status("cafe-b", None).await.unwrap().total_queue_size, total);

    service.leave("cafe-b", "u1").await.unwrap();
    service.leave("cafe-b", "u1").await.unwrap();
    service.leave("cafe-b", "never-joined").await.unwrap();
    assert_eq!(
        service.status("cafe-b", None).await.unwrap().total_queue_size,
        total - 1
    );
}

#[tokio::test]
async fn test_status_thresholds_through_service() {
    let (_, service) = stack(SeedConfig::empty());

    for (count, expected) in [(5, QueueStatus::Green), (6, QueueStatus::Yellow), (21, QueueStatus::Red)] {
        let restaurant = format!("r{}", count);
        for i in 0..count {
            service.join(req(&restaurant, &format!("p{}", i), None)).await.unwrap();
        }
        let view = service.status(&restaurant, None).await.unwrap();
        assert_eq!(view.current_status, expected, "count {}", count);
    }

    assert_eq!(estimate_wait_minutes(0), 0);
    assert_eq!(estimate_wait_minutes(1), 2);
    assert_eq!(estimate_wait_minutes(7), 11);
}

#[tokio::test]
async fn test_advancer_serves_in_ticket_order() {
    let (store, service) = stack(SeedConfig::empty());
    for i in 0..3 {
        service.join(req("deli", &format!("u{}", i), None)).await.unwrap();
    }

    let advancer = QueueAdvancer::new(store.clone(), Arc::new(ThreadRandomSource))
        .with_serve_probability(1.0);

    advancer.tick().await.unwrap();
    let queue = store.snapshot("deli").await.unwrap();
    assert_eq!(queue.current_number(), 101);
    assert_eq!(service.status("deli", Some("u1")).await.unwrap().people_ahead, 0);

    advancer.tick().await.unwrap();
    advancer.tick().await.unwrap();
    advancer.tick().await.unwrap();
    let queue = store.snapshot("deli").await.unwrap();
    assert!(queue.is_empty());
    assert_eq!(queue.current_number(), 103);

    // Served participants are no longer in the queue; next ticket keeps counting
    let view = service.status("deli", Some("u0")).await.unwrap();
    assert_eq!(view.my_queue_number, None);
    let next = service.join(req("deli", "u0", None)).await.unwrap();
    assert_eq!(next.queue_number, 104);

    println!("✅ advancer serves FIFO");
}
