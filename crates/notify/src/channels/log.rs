//! Log-only channel used when no gateway is configured.

use async_trait::async_trait;
use pager::{Notification, NotificationSender, PortResult, TargetKind};
use tracing::info;

/// Records notifications in the log instead of delivering them.
pub struct LogChannel {
    kind: TargetKind,
}

impl LogChannel {
    #[must_use]
    pub const fn new(kind: TargetKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl NotificationSender for LogChannel {
    fn name(&self) -> &'static str {
        match self.kind {
            TargetKind::Email => "mail-log",
            TargetKind::Sms => "sms-log",
        }
    }

    async fn send(&self, notification: &Notification) -> PortResult<()> {
        info!(
            channel = self.name(),
            service_id = %notification.incident.service_id,
            recipient = %notification.target.recipient,
            level = notification.level,
            subject = %notification.subject(),
            "Notification not delivered (no gateway configured)"
        );
        Ok(())
    }
}
