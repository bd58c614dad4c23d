// Domain Layer - Pure business logic and entities

pub mod error;
pub mod queue;
pub mod status;

// Re-exports
pub use error::DomainError;
pub use queue::{
    EstablishmentId, EstablishmentQueue, JoinOutcome, ParticipantId, PartySize, QueueEntry,
    TicketNumber, FIRST_TICKET_NUMBER, INITIAL_CURRENT_NUMBER, MAX_PARTY_SIZE, MIN_PARTY_SIZE,
};
pub use status::{estimate_wait_minutes, QueueStatus, QueueStatusView};
