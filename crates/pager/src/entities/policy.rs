//! Escalation policy value objects.
//!
//! Policies are owned by an external service and fetched fresh on every
//! escalation cycle; they are assumed to arrive validated and ordered.

use serde::{Deserialize, Serialize};

use super::ServiceId;

/// Delivery medium of a notification target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Email,
    Sms,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Sms => write!(f, "sms"),
        }
    }
}

/// A single recipient: an email address or a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    pub recipient: String,
}

impl Target {
    pub fn email(address: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Email,
            recipient: address.into(),
        }
    }

    pub fn sms(phone_number: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Sms,
            recipient: phone_number.into(),
        }
    }
}

/// One step of an escalation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationLevel {
    /// Ordinal of this level
    pub level: usize,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl EscalationLevel {
    pub fn new(level: usize, targets: Vec<Target>) -> Self {
        Self { level, targets }
    }

    pub fn email_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets_of(TargetKind::Email)
    }

    pub fn sms_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets_of(TargetKind::Sms)
    }

    fn targets_of(&self, kind: TargetKind) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(move |t| t.kind == kind)
    }
}

/// Ordered escalation levels for one monitored service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationPolicy {
    pub service_id: ServiceId,
    pub levels: Vec<EscalationLevel>,
}

impl EscalationPolicy {
    pub fn new(service_id: ServiceId, levels: Vec<EscalationLevel>) -> Self {
        Self { service_id, levels }
    }

    /// Level at list position `index`
    pub fn level(&self, index: usize) -> Option<&EscalationLevel> {
        self.levels.get(index)
    }

    /// Index of the highest defined level, `None` for an empty policy
    pub fn last_index(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }
}
