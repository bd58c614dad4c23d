// Derived Queue Status (never stored)

use super::queue::{EstablishmentQueue, TicketNumber};
use serde::{Deserialize, Serialize};

/// Queues longer than this are RED
pub const RED_THRESHOLD: u32 = 20;

/// Queues longer than this (and not RED) are YELLOW
pub const YELLOW_THRESHOLD: u32 = 5;

/// Crowding classification shown to participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    Green,
    Yellow,
    Red,
}

impl QueueStatus {
    /// Classify by total queue size. Strict `>` on both thresholds.
    pub fn classify(total_queue_size: u32) -> Self {
        if total_queue_size > RED_THRESHOLD {
            QueueStatus::Red
        } else if total_queue_size > YELLOW_THRESHOLD {
            QueueStatus::Yellow
        } else {
            QueueStatus::Green
        }
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueStatus::Green => write!(f, "GREEN"),
            QueueStatus::Yellow => write!(f, "YELLOW"),
            QueueStatus::Red => write!(f, "RED"),
        }
    }
}

/// `ceil(count * 1.5)` in integer arithmetic
pub fn estimate_wait_minutes(count: u32) -> u32 {
    let minutes = (u64::from(count) * 3 + 1) / 2;
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// What one participant sees for one establishment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatusView {
    pub restaurant_id: String,
    pub my_queue_number: Option<TicketNumber>,
    pub people_ahead: u32,
    pub estimated_wait_time_minutes: u32,
    pub total_queue_size: u32,
    pub current_status: QueueStatus,
}

impl QueueStatusView {
    /// Build a view from raw counts, deriving wait time and status.
    ///
    /// Wait time is computed from `people_ahead` when the participant holds a
    /// ticket and from `total_queue_size` otherwise. Server and client
    /// simulation both go through here.
    pub fn from_counts(
        restaurant_id: impl Into<String>,
        my_queue_number: Option<TicketNumber>,
        people_ahead: u32,
        total_queue_size: u32,
    ) -> Self {
        let relevant = if my_queue_number.is_some() {
            people_ahead
        } else {
            total_queue_size
        };

        Self {
            restaurant_id: restaurant_id.into(),
            my_queue_number,
            people_ahead,
            estimated_wait_time_minutes: estimate_wait_minutes(relevant),
            total_queue_size,
            current_status: QueueStatus::classify(total_queue_size),
        }
    }

    /// Derive the view of `participant_id` (or of an outsider when `None`/absent)
    pub fn derive(queue: &EstablishmentQueue, participant_id: Option<&str>) -> Self {
        let total = saturating_count(queue.len());

        let found = participant_id.and_then(|id| {
            queue
                .position_of(id)
                .and_then(|index| queue.entry_of(id).map(|e| (index, e.queue_number)))
        });

        match found {
            Some((index, queue_number)) => {
                Self::from_counts(queue.id(), Some(queue_number), saturating_count(index), total)
            }
            None => Self::from_counts(queue.id(), None, total, total),
        }
    }

    pub fn is_in_queue(&self) -> bool {
        self.my_queue_number.is_some()
    }
}
