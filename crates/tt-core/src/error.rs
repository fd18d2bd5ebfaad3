//! Errors raised by the tracker.

use thiserror::Error;

/// Errors returned by [`ActivityTracker`](crate::ActivityTracker) operations.
///
/// Every variant is a caller error; nothing here is transient or retryable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// An argument was missing or not acceptable for the operation.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// The operation is not valid in the tracker's current lifecycle state.
    #[error("invalid state: {reason}")]
    InvalidState { reason: &'static str },
}

impl TrackerError {
    pub(crate) const fn not_started() -> Self {
        Self::InvalidState {
            reason: "session has not been started",
        }
    }
}
