// Demo seeding of freshly created queues

use std::ops::RangeInclusive;
use waitline_core::domain::{EstablishmentQueue, PartySize};
use waitline_core::error::{AppError, Result};
use waitline_core::port::{IdProvider, RandomSource, TimeProvider};

pub const DEFAULT_SEED_MIN: u32 = 3;
pub const DEFAULT_SEED_MAX: u32 = 7;

const SEED_PARTY_SIZE_MIN: PartySize = 1;
const SEED_PARTY_SIZE_MAX: PartySize = 3;

/// How many synthetic parties a new queue starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    min: u32,
    max: u32,
}

impl SeedConfig {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(AppError::Config(format!(
                "seed range is empty: min {} > max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// No synthetic entries at all
    pub fn empty() -> Self {
        Self { min: 0, max: 0 }
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    /// Build a new queue holding a random number of `dummy-<id>` parties
    pub(crate) fn seeded_queue(
        &self,
        establishment_id: &str,
        random: &dyn RandomSource,
        ids: &dyn IdProvider,
        time: &dyn TimeProvider,
    ) -> EstablishmentQueue {
        let mut queue = EstablishmentQueue::new(establishment_id);
        let count = random.between(i64::from(self.min), i64::from(self.max));
        let now = time.now_millis();

        for _ in 0..count {
            let party_size = random.between(
                i64::from(SEED_PARTY_SIZE_MIN),
                i64::from(SEED_PARTY_SIZE_MAX),
            );
            let party_size = PartySize::try_from(party_size).unwrap_or(SEED_PARTY_SIZE_MIN);
            queue.join(format!("dummy-{}", ids.generate_id()), party_size, now);
        }

        queue
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_SEED_MIN,
            max: DEFAULT_SEED_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waitline_core::domain::FIRST_TICKET_NUMBER;
    use waitline_core::port::id_provider::mocks::SequentialIdProvider;
    use waitline_core::port::random_source::mocks::ScriptedRandomSource;
    use waitline_core::port::time_provider::mocks::FixedTimeProvider;

    #[test]
    fn test_seed_config_validation() {
        assert!(SeedConfig::new(3, 7).is_ok());
        assert!(SeedConfig::new(0, 0).is_ok());
        assert!(SeedConfig::new(5, 2).is_err());
        assert_eq!(SeedConfig::default().range(), 3..=7);
        assert_eq!(SeedConfig::empty().range(), 0..=0);
    }

    #[test]
    fn test_seeded_queue_shape() {
        // count = 4, then party sizes 2, 3, 1, 9 (clamped to 3)
        let random = ScriptedRandomSource::new(false).with_values([4, 2, 3, 1, 9]);
        let queue = SeedConfig::default().seeded_queue(
            "cafe-a",
            &random,
            &SequentialIdProvider::default(),
            &FixedTimeProvider::new(42),
        );

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.current_number(), 100);
        assert_eq!(queue.next_ticket_number(), FIRST_TICKET_NUMBER + 4);

        let ids: Vec<_> = queue.entries().map(|e| e.participant_id.as_str()).collect();
        assert_eq!(ids, vec!["dummy-test-1", "dummy-test-2", "dummy-test-3", "dummy-test-4"]);

        let sizes: Vec<_> = queue.entries().map(|e| e.party_size).collect();
        assert_eq!(sizes, vec![2, 3, 1, 3]);
        assert!(queue.entries().all(|e| e.joined_at == 42));
    }

    #[test]
    fn test_empty_seed() {
        let random = ScriptedRandomSource::new(false).with_values([5]);
        let queue = SeedConfig::empty().seeded_queue(
            "cafe-a",
            &random,
            &SequentialIdProvider::default(),
            &FixedTimeProvider::new(0),
        );
        assert!(queue.is_empty());
        assert_eq!(queue.next_ticket_number(), FIRST_TICKET_NUMBER);
    }
}
