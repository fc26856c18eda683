//! Core entities and value objects.

mod incident;
mod notification;
mod policy;

pub use incident::{Incident, ServiceId};
pub use notification::Notification;
pub use policy::{EscalationLevel, EscalationPolicy, Target, TargetKind};
