//! Notification payload handed to the mail and SMS senders.

use serde::{Deserialize, Serialize};

use super::{Incident, Target};

/// One incident paired with exactly one target. Never batched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub incident: Incident,
    pub target: Target,
    /// Index of the policy level being paged
    pub level: usize,
}

impl Notification {
    pub fn new(incident: Incident, target: Target, level: usize) -> Self {
        Self {
            incident,
            target,
            level,
        }
    }

    /// Short human-readable subject line
    pub fn subject(&self) -> String {
        format!(
            "[pager] service {} is unhealthy (level {})",
            self.incident.service_id, self.level
        )
    }
}
