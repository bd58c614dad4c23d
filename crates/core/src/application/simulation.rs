//! Fallback Simulation - client-side evolution of a queue view
//!
//! Used when the authoritative service cannot be reached. Every step goes
//! through [`QueueStatusView::from_counts`], the same derivation the server
//! uses, so switching between live and simulated views keeps wait times and
//! status colours consistent.

use crate::domain::{QueueStatusView, TicketNumber};
use crate::port::RandomSource;
use std::sync::Arc;

/// Chance per tick that a queued participant moves up one place
pub const ADVANCE_PROBABILITY: f64 = 0.4;

/// Chance per tick that the queue drains by one during an emergency stop
pub const DRAIN_PROBABILITY: f64 = 0.3;

/// Minimum number of parties assumed behind a queued participant
pub const MIN_PARTIES_BEHIND: u32 = 5;

/// Range of provisional ticket numbers handed out by an offline join
pub const PROVISIONAL_TICKET_MIN: i64 = 100;
pub const PROVISIONAL_TICKET_MAX: i64 = 199;

/// Evolves a [`QueueStatusView`] locally, one polling tick at a time
pub struct FallbackSimulator {
    random: Arc<dyn RandomSource>,
}

impl FallbackSimulator {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Synthetic starting view used before the first successful poll
    pub fn initial_view(establishment_id: &str) -> QueueStatusView {
        let len = u32::try_from(establishment_id.chars().count()).unwrap_or(u32::MAX);
        let waiting = len.saturating_mul(2).saturating_add(5);
        QueueStatusView::from_counts(establishment_id, None, waiting, waiting)
    }

    /// Advance `prev` by one tick
    pub fn step(&self, prev: &QueueStatusView, emergency_stop: bool) -> QueueStatusView {
        if emergency_stop {
            return self.drain(prev);
        }

        if prev.is_in_queue() {
            let mut people_ahead = prev.people_ahead;
            if people_ahead > 0 && self.random.chance(ADVANCE_PROBABILITY) {
                people_ahead -= 1;
            }

            let floor = people_ahead.saturating_add(MIN_PARTIES_BEHIND);
            let total = prev.total_queue_size.max(floor);

            QueueStatusView::from_counts(
                prev.restaurant_id.clone(),
                prev.my_queue_number,
                people_ahead,
                total,
            )
        } else {
            let delta = self.random.between(-1, 1);
            let total = (i64::from(prev.total_queue_size) + delta).max(0);
            let total = u32::try_from(total).unwrap_or(u32::MAX);

            QueueStatusView::from_counts(prev.restaurant_id.clone(), None, total, total)
        }
    }

    /// Admission closed: the queue may only shrink
    fn drain(&self, prev: &QueueStatusView) -> QueueStatusView {
        let mut total = prev.total_queue_size;
        if total > 0 && self.random.chance(DRAIN_PROBABILITY) {
            total -= 1;
        }

        let people_ahead = if prev.is_in_queue() {
            prev.people_ahead.min(total)
        } else {
            total
        };

        QueueStatusView::from_counts(
            prev.restaurant_id.clone(),
            prev.my_queue_number,
            people_ahead,
            total,
        )
    }

    /// Offline join: provisional ticket, placed behind everyone currently waiting
    pub fn local_join(&self, prev: &QueueStatusView) -> QueueStatusView {
        if prev.is_in_queue() {
            return prev.clone();
        }

        let ticket = self
            .random
            .between(PROVISIONAL_TICKET_MIN, PROVISIONAL_TICKET_MAX);
        let ticket = TicketNumber::try_from(ticket).unwrap_or(PROVISIONAL_TICKET_MIN as TicketNumber);

        QueueStatusView::from_counts(
            prev.restaurant_id.clone(),
            Some(ticket),
            prev.total_queue_size.saturating_add(1),
            prev.total_queue_size,
        )
    }

    /// Optimistic update after the service accepted a join: we are last in line
    pub fn apply_remote_join(prev: &QueueStatusView, queue_number: TicketNumber) -> QueueStatusView {
        if prev.my_queue_number == Some(queue_number) {
            return prev.clone();
        }

        QueueStatusView::from_counts(
            prev.restaurant_id.clone(),
            Some(queue_number),
            prev.total_queue_size,
            prev.total_queue_size.saturating_add(1),
        )
    }

    /// Leaving always clears the local ticket, whatever the service said
    pub fn apply_leave(prev: &QueueStatusView) -> QueueStatusView {
        QueueStatusView::from_counts(
            prev.restaurant_id.clone(),
            None,
            prev.total_queue_size,
            prev.total_queue_size,
        )
    }
}
