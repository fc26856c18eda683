//! Fan-out of one escalation level to the mail and SMS senders.

use std::sync::Arc;

use tracing::debug;

use crate::entities::{EscalationLevel, Incident, Notification, TargetKind};
use crate::errors::PortResult;
use crate::ports::NotificationSender;

/// Routes each target of a level to the sender for its kind.
#[derive(Clone)]
pub struct NotificationRouter {
    mail: Arc<dyn NotificationSender>,
    sms: Arc<dyn NotificationSender>,
}

impl NotificationRouter {
    pub fn new(mail: Arc<dyn NotificationSender>, sms: Arc<dyn NotificationSender>) -> Self {
        Self { mail, sms }
    }

    fn sender_for(&self, kind: TargetKind) -> &Arc<dyn NotificationSender> {
        match kind {
            TargetKind::Email => &self.mail,
            TargetKind::Sms => &self.sms,
        }
    }

    /// Send one notification per target of `level`, every email target before
    /// any SMS target, stopping at the first failure. Returns the number of
    /// notifications sent.
    pub async fn page_level(
        &self,
        incident: &Incident,
        index: usize,
        level: &EscalationLevel,
    ) -> PortResult<usize> {
        let mut sent = 0;
        for target in level.email_targets().chain(level.sms_targets()) {
            let sender = self.sender_for(target.kind);
            let notification = Notification::new(incident.clone(), target.clone(), index);
            sender.send(&notification).await?;
            debug!(
                service_id = %incident.service_id,
                level = index,
                channel = sender.name(),
                recipient = %target.recipient,
                "Notification sent"
            );
            sent += 1;
        }
        Ok(sent)
    }
}
