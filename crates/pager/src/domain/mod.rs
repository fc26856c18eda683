//! Incident lifecycle use cases.
//!
//! Each use case reads and mutates the shared incident record only through
//! [`IncidentStore`]; they hold no state of their own between calls.

mod dispatch;
mod escalate;
mod open;
mod update;

use std::sync::Arc;

pub use dispatch::NotificationRouter;
pub use escalate::{EscalateIncidence, EscalationOutcome, SkipReason};
pub use open::{OpenIncidence, OpenOutcome};
pub use update::UpdateIncidence;

use crate::ports::{EscalationPolicyLookup, NotificationSender, TimerControl};
use crate::storage::IncidentStore;

/// The external collaborators the use cases are wired against.
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn IncidentStore>,
    pub policies: Arc<dyn EscalationPolicyLookup>,
    pub mail: Arc<dyn NotificationSender>,
    pub sms: Arc<dyn NotificationSender>,
    pub timer: Arc<dyn TimerControl>,
}

impl Collaborators {
    pub(crate) fn router(&self) -> NotificationRouter {
        NotificationRouter::new(Arc::clone(&self.mail), Arc::clone(&self.sms))
    }
}
