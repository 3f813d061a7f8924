//! Failure taxonomy for queue operations.
//!
//! Every fallible operation reports through [`QueueError`]; none of them
//! panic or abort. A returned error always means the queue was left exactly
//! as it was before the call.

use std::collections::TryReserveError;

/// Errors returned by queue and handle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The queue handle is absent.
    #[error("queue handle is absent")]
    MissingQueue,
    /// The string argument to an insert is absent.
    #[error("string argument is absent")]
    MissingValue,
    /// The output buffer for a removal is absent.
    #[error("output buffer is absent")]
    MissingBuffer,
    /// The output buffer has no room for even the terminator.
    #[error("output buffer has zero capacity")]
    ZeroCapacity,
    /// Removal was attempted on an empty queue.
    #[error("queue is empty")]
    Empty,
    /// Copying the payload or growing the node arena failed to allocate.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
    /// The arena ran out of `u32` node indices.
    #[error("node index space exhausted")]
    NodeLimit,
}

impl QueueError {
    /// Returns `true` for the invalid-argument class (as opposed to
    /// allocation failure or an empty queue).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::MissingQueue | Self::MissingValue | Self::MissingBuffer | Self::ZeroCapacity
        )
    }

    /// Returns `true` when the failure came from the allocator.
    pub fn is_alloc_failure(&self) -> bool {
        matches!(self, Self::Alloc(_) | Self::NodeLimit)
    }
}

#[cfg(test)]
mod tests {
    use super::QueueError;

    #[test]
    fn classifies_invalid_arguments() {
        assert!(QueueError::MissingQueue.is_invalid_argument());
        assert!(QueueError::MissingValue.is_invalid_argument());
        assert!(QueueError::MissingBuffer.is_invalid_argument());
        assert!(QueueError::ZeroCapacity.is_invalid_argument());
        assert!(!QueueError::Empty.is_invalid_argument());
        assert!(!QueueError::NodeLimit.is_invalid_argument());
    }

    #[test]
    fn reserve_failure_converts_to_alloc() {
        let err = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let err = QueueError::from(err);
        assert!(err.is_alloc_failure());
        assert!(err.to_string().starts_with("allocation failed"));
    }

    #[test]
    fn display_messages() {
        assert_eq!(QueueError::Empty.to_string(), "queue is empty");
        assert_eq!(
            QueueError::ZeroCapacity.to_string(),
            "output buffer has zero capacity"
        );
    }
}
