//! Incident entity and the service identifier it is keyed by.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a monitored service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(Uuid);

impl ServiceId {
    /// Generate a random identifier
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ServiceId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ServiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// An open incident: the record of a monitored service that is currently unhealthy.
///
/// A record exists in the store if and only if the service is unhealthy.
/// `current_escalation_level` is the index of the last policy level that was
/// notified; it is not incremented when level 0 is paged on open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub service_id: ServiceId,

    #[serde(default)]
    pub acknowledged: bool,

    #[serde(default)]
    pub current_escalation_level: usize,

    pub alert_message: String,

    pub opened_at: DateTime<Utc>,

    /// Store-managed version for compare-and-set updates
    #[serde(default)]
    pub revision: u64,
}

impl Incident {
    /// A fresh, unacknowledged incident at level 0
    pub fn open(service_id: ServiceId, alert_message: impl Into<String>) -> Self {
        Self {
            service_id,
            acknowledged: false,
            current_escalation_level: 0,
            alert_message: alert_message.into(),
            opened_at: Utc::now(),
            revision: 0,
        }
    }

    /// Whether a timeout should escalate this incident
    pub fn is_escalatable(&self) -> bool {
        !self.acknowledged
    }

    pub fn acknowledge(&mut self) {
        self.acknowledged = true;
    }

    /// Record that `level` has been notified. The level never decreases.
    pub fn record_notified_level(&mut self, level: usize) {
        self.current_escalation_level = self.current_escalation_level.max(level);
    }
}
