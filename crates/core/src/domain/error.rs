// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid party size: {0} (allowed {min}..={max})", min = crate::domain::MIN_PARTY_SIZE, max = crate::domain::MAX_PARTY_SIZE)]
    InvalidPartySize(i64),

    #[error("Missing identifier: {0}")]
    MissingIdentifier(&'static str),
}

pub type Result<T> = std::result::Result<T, DomainError>;
