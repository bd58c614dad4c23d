// Establishment Queue Domain Model

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Establishment identifier (wire name: `restaurantId`)
pub type EstablishmentId = String;

/// Opaque participant identifier (wire name: `userId`)
pub type ParticipantId = String;

/// Per-establishment ticket number
pub type TicketNumber = u64;

/// Number of people in one party
pub type PartySize = u32;

/// `currentNumber` of a freshly created queue (nothing served yet)
pub const INITIAL_CURRENT_NUMBER: TicketNumber = 100;

/// First ticket handed out by a freshly created queue
pub const FIRST_TICKET_NUMBER: TicketNumber = 101;

pub const MIN_PARTY_SIZE: PartySize = 1;
pub const MAX_PARTY_SIZE: PartySize = 8;

/// One waiting party. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub participant_id: ParticipantId,
    pub party_size: PartySize,
    pub joined_at: i64, // epoch ms
    pub queue_number: TicketNumber,
}

/// Result of a join against a single establishment queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A new entry was appended with this ticket
    Joined(TicketNumber),
    /// Participant was already waiting; their existing ticket is returned
    AlreadyQueued(TicketNumber),
}

impl JoinOutcome {
    pub fn queue_number(&self) -> TicketNumber {
        match self {
            JoinOutcome::Joined(n) | JoinOutcome::AlreadyQueued(n) => *n,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, JoinOutcome::Joined(_))
    }
}

/// FIFO waiting list of one establishment plus its ticket counters.
///
/// Invariants:
/// - at most one entry per participant id
/// - `next_ticket_number` is strictly greater than every ticket ever handed out
/// - `current_number` never decreases
///
/// `join`, `remove_participant` and `pop_front` are the only mutations of `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishmentQueue {
    id: EstablishmentId,
    items: VecDeque<QueueEntry>,
    current_number: TicketNumber,
    next_ticket_number: TicketNumber,
}

impl EstablishmentQueue {
    /// Create an empty queue with the default counters
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: VecDeque::new(),
            current_number: INITIAL_CURRENT_NUMBER,
            next_ticket_number: FIRST_TICKET_NUMBER,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_number(&self) -> TicketNumber {
        self.current_number
    }

    pub fn next_ticket_number(&self) -> TicketNumber {
        self.next_ticket_number
    }

    /// Entries in serving order (front first)
    pub fn entries(&self) -> impl Iterator<Item = &QueueEntry> {
        self.items.iter()
    }

    /// 0-based index of the participant's entry (= number of parties ahead)
    pub fn position_of(&self, participant_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|entry| entry.participant_id == participant_id)
    }

    pub fn entry_of(&self, participant_id: &str) -> Option<&QueueEntry> {
        self.items
            .iter()
            .find(|entry| entry.participant_id == participant_id)
    }

    /// Find-or-append. A participant already waiting keeps their ticket.
    pub fn join(
        &mut self,
        participant_id: impl Into<String>,
        party_size: PartySize,
        joined_at: i64,
    ) -> JoinOutcome {
        let participant_id = participant_id.into();

        if let Some(existing) = self.entry_of(&participant_id) {
            return JoinOutcome::AlreadyQueued(existing.queue_number);
        }

        let queue_number = self.next_ticket_number;
        self.next_ticket_number += 1;

        self.items.push_back(QueueEntry {
            participant_id,
            party_size,
            joined_at,
            queue_number,
        });

        JoinOutcome::Joined(queue_number)
    }

    /// Remove the participant's entry. Returns false if they were not waiting.
    pub fn remove_participant(&mut self, participant_id: &str) -> bool {
        match self.position_of(participant_id) {
            Some(index) => self.items.remove(index).is_some(),
            None => false,
        }
    }

    /// Serve the head of the queue and mark its ticket as called
    pub fn pop_front(&mut self) -> Option<QueueEntry> {
        let served = self.items.pop_front()?;
        // Heads are popped in ticket order, so this only moves forward.
        self.current_number = self.current_number.max(served.queue_number);
        Some(served)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_queue_counters() {
        let queue = EstablishmentQueue::new("cafe-a");
        assert_eq!(queue.id(), "cafe-a");
        assert!(queue.is_empty());
        assert_eq!(queue.current_number(), 100);
        assert_eq!(queue.next_ticket_number(), 101);
    }

    #[test]
    fn test_join_assigns_increasing_tickets() {
        let mut queue = EstablishmentQueue::new("cafe-a");

        assert_eq!(queue.join("u1", 2, 1_000), JoinOutcome::Joined(101));
        assert_eq!(queue.join("u2", 1, 2_000), JoinOutcome::Joined(102));
        assert_eq!(queue.join("u3", 4, 3_000), JoinOutcome::Joined(103));
        assert_eq!(queue.next_ticket_number(), 104);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_duplicate_join_returns_existing_ticket() {
        let mut queue = EstablishmentQueue::new("cafe-a");
        queue.join("u1", 2, 1_000);
        queue.join("u2", 2, 1_000);

        let again = queue.join("u1", 5, 9_000);
        assert_eq!(again, JoinOutcome::AlreadyQueued(101));
        assert!(!again.is_new());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.next_ticket_number(), 103);

        // Original entry is untouched
        let entry = queue.entry_of("u1").unwrap();
        assert_eq!(entry.party_size, 2);
        assert_eq!(entry.joined_at, 1_000);
    }

    #[test]
    fn test_tickets_are_not_reused_after_leave() {
        let mut queue = EstablishmentQueue::new("cafe-a");
        queue.join("u1", 1, 0);
        assert!(queue.remove_participant("u1"));

        assert_eq!(queue.join("u1", 1, 0), JoinOutcome::Joined(102));
    }

    #[test]
    fn test_remove_absent_participant_is_noop() {
        let mut queue = EstablishmentQueue::new("cafe-a");
        queue.join("u1", 1, 0);

        assert!(!queue.remove_participant("ghost"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_position_of_is_index() {
        let mut queue = EstablishmentQueue::new("cafe-a");
        for id in ["a", "b", "c", "d"] {
            queue.join(id, 1, 0);
        }

        assert_eq!(queue.position_of("a"), Some(0));
        assert_eq!(queue.position_of("c"), Some(2));
        assert_eq!(queue.position_of("zzz"), None);

        queue.remove_participant("b");
        assert_eq!(queue.position_of("c"), Some(1));
    }

    #[test]
    fn test_pop_front_updates_current_number() {
        let mut queue = EstablishmentQueue::new("cafe-a");
        queue.join("u1", 1, 0);
        queue.join("u2", 1, 0);

        let served = queue.pop_front().unwrap();
        assert_eq!(served.participant_id, "u1");
        assert_eq!(queue.current_number(), 101);

        queue.pop_front();
        assert_eq!(queue.current_number(), 102);

        assert!(queue.pop_front().is_none());
        assert_eq!(queue.current_number(), 102);
    }
}
