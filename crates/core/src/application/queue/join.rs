// Join Use Case

use crate::domain::{DomainError, JoinOutcome, PartySize, TicketNumber, MAX_PARTY_SIZE, MIN_PARTY_SIZE};
use crate::error::{AppError, Result};
use crate::port::{QueueStore, TimeProvider};
use std::str::FromStr;
use tracing::info;

/// Party size used when the request omits it
pub const DEFAULT_PARTY_SIZE: PartySize = 1;

/// Join request (validated before any mutation)
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub establishment_id: String,
    pub participant_id: String,

    /// Raw requested size; `None` means "not given"
    pub party_size: Option<i64>,
}

/// Join result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinResponse {
    pub queue_number: TicketNumber,
    /// false when the participant was already waiting
    pub newly_joined: bool,
}

/// How out-of-range party sizes are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartySizePolicy {
    /// Reject sizes outside `1..=8`
    #[default]
    Strict,
    /// Clamp sizes into `1..=8`
    Clamp,
}

impl PartySizePolicy {
    pub fn resolve(&self, requested: Option<i64>) -> Result<PartySize> {
        let requested = requested.unwrap_or(i64::from(DEFAULT_PARTY_SIZE));
        let (min, max) = (i64::from(MIN_PARTY_SIZE), i64::from(MAX_PARTY_SIZE));

        let size = match self {
            PartySizePolicy::Strict if !(min..=max).contains(&requested) => {
                return Err(DomainError::InvalidPartySize(requested).into());
            }
            PartySizePolicy::Strict => requested,
            PartySizePolicy::Clamp => requested.clamp(min, max),
        };

        // In range by construction
        PartySize::try_from(size).map_err(|e| AppError::Internal(e.to_string()))
    }
}

impl FromStr for PartySizePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(PartySizePolicy::Strict),
            "clamp" => Ok(PartySizePolicy::Clamp),
            other => Err(AppError::Config(format!(
                "unknown party size policy '{}' (expected 'strict' or 'clamp')",
                other
            ))),
        }
    }
}

/// Reject blank establishment/participant ids
pub fn validate_ids(establishment_id: &str, participant_id: &str) -> Result<()> {
    if establishment_id.trim().is_empty() {
        return Err(DomainError::MissingIdentifier("restaurantId").into());
    }
    if participant_id.trim().is_empty() {
        return Err(DomainError::MissingIdentifier("userId").into());
    }
    Ok(())
}

/// Execute join use case
///
/// Validation happens up front; the find-or-append itself is a single store
/// step, so a duplicate join can never create a second entry.
pub async fn execute(
    store: &dyn QueueStore,
    time_provider: &dyn TimeProvider,
    policy: PartySizePolicy,
    req: JoinRequest,
) -> Result<JoinResponse> {
    validate_ids(&req.establishment_id, &req.participant_id)?;
    let party_size = policy.resolve(req.party_size)?;

    let joined_at = time_provider.now_millis();
    let outcome = store
        .join(&req.establishment_id, &req.participant_id, party_size, joined_at)
        .await?;

    match outcome {
        JoinOutcome::Joined(queue_number) => info!(
            restaurant_id = %req.establishment_id,
            user_id = %req.participant_id,
            party_size,
            queue_number,
            "Participant joined queue"
        ),
        JoinOutcome::AlreadyQueued(queue_number) => info!(
            restaurant_id = %req.establishment_id,
            user_id = %req.participant_id,
            queue_number,
            "Participant already queued, returning existing ticket"
        ),
    }

    Ok(JoinResponse {
        queue_number: outcome.queue_number(),
        newly_joined: outcome.is_new(),
    })
}
