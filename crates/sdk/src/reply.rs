//! Authoritative-or-unavailable reply

use crate::error::{Result, SdkError};

/// Outcome of a call where "no answer" is an expected, recoverable case.
///
/// `Unavailable` means the caller should fall back to local simulation. Errors
/// the service did answer with (bad input) are not folded in here; they stay
/// in the surrounding `Result`.
#[derive(Debug)]
pub enum ServiceReply<T> {
    Authoritative(T),
    Unavailable(SdkError),
}

impl<T> ServiceReply<T> {
    /// Split a call result into answered / unavailable / rejected
    pub fn classify(result: Result<T>) -> Result<Self> {
        match result {
            Ok(value) => Ok(ServiceReply::Authoritative(value)),
            Err(e) if e.is_unavailable() => Ok(ServiceReply::Unavailable(e)),
            Err(e) => Err(e),
        }
    }

    pub fn is_authoritative(&self) -> bool {
        matches!(self, ServiceReply::Authoritative(_))
    }

    pub fn authoritative(self) -> Option<T> {
        match self {
            ServiceReply::Authoritative(value) => Some(value),
            ServiceReply::Unavailable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let reply = ServiceReply::classify(Ok(7)).unwrap();
        assert!(reply.is_authoritative());
        assert_eq!(reply.authoritative(), Some(7));

        let reply = ServiceReply::<u32>::classify(Err(SdkError::Timeout)).unwrap();
        assert!(!reply.is_authoritative());
        assert_eq!(reply.authoritative(), None);

        let rejected = ServiceReply::<u32>::classify(Err(SdkError::Http {
            status: 400,
            message: "Missing identifier: userId".into(),
        }));
        assert!(rejected.is_err());
    }
}
