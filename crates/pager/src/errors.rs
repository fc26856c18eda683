//! Error types for the pager crate.

use thiserror::Error;

use crate::entities::ServiceId;

/// Failures reported by collaborators (store, policy lookup, senders, timer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("Incident store error: {reason}")]
    Store { reason: String },

    #[error("Concurrent modification of incident for service '{service_id}': {reason}")]
    Conflict {
        service_id: ServiceId,
        reason: String,
    },

    #[error("Escalation policy lookup failed: {reason}")]
    Policy { reason: String },

    #[error("Notification delivery via {channel} failed: {reason}")]
    Delivery { channel: String, reason: String },

    #[error("Timer error: {reason}")]
    Timer { reason: String },
}

/// Result type alias for collaborator calls
pub type PortResult<T> = Result<T, PortError>;

/// The single error kind surfaced by the pager use cases.
///
/// Carries the message of whatever underlying failure aborted the operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Pager service error: {message}")]
pub struct PagerServiceError {
    message: String,
}

impl PagerServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The wrapped failure message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<PortError> for PagerServiceError {
    fn from(err: PortError) -> Self {
        Self::new(err.to_string())
    }
}

/// Result type alias for pager operations
pub type PagerResult<T> = Result<T, PagerServiceError>;
