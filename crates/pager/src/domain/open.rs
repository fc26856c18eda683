//! Open-incidence use case: first alert for a healthy service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::{Collaborators, NotificationRouter};
use crate::config::EngineConfig;
use crate::entities::{Incident, ServiceId};
use crate::errors::{PagerResult, PortError, PortResult};
use crate::ports::{AlertHandler, EscalationPolicyLookup, TimerControl};
use crate::storage::IncidentStore;

/// Result of handling an alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The service was healthy; level 0 was paged and the timer armed
    Opened(Incident),
    /// The service already has an open incident; nothing was done
    AlreadyOpen,
}

/// Pages level 0 of the escalation policy when a healthy service raises an alert.
pub struct OpenIncidence {
    store: Arc<dyn IncidentStore>,
    policies: Arc<dyn EscalationPolicyLookup>,
    router: NotificationRouter,
    timer: Arc<dyn TimerControl>,
    config: EngineConfig,
}

impl OpenIncidence {
    pub fn new(collaborators: &Collaborators, config: EngineConfig) -> Self {
        Self {
            store: Arc::clone(&collaborators.store),
            policies: Arc::clone(&collaborators.policies),
            router: collaborators.router(),
            timer: Arc::clone(&collaborators.timer),
            config,
        }
    }

    /// Open an incident for `service_id` unless one is already open.
    ///
    /// Repeated alerts for an unhealthy service are a strict no-op: no policy
    /// lookup, no notifications, no timer, and the stored alert message is kept.
    #[instrument(skip(self, alert_message), fields(service_id = %service_id))]
    pub async fn open(
        &self,
        service_id: &ServiceId,
        alert_message: &str,
    ) -> PagerResult<OpenOutcome> {
        self.try_open(service_id, alert_message)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to open incident"))
            .map_err(Into::into)
    }

    async fn try_open(
        &self,
        service_id: &ServiceId,
        alert_message: &str,
    ) -> PortResult<OpenOutcome> {
        if self.store.read(service_id).await?.is_some() {
            debug!("Incident already open, ignoring alert");
            return Ok(OpenOutcome::AlreadyOpen);
        }

        let incident = match self.store.create(service_id, alert_message).await {
            Ok(incident) => incident,
            Err(PortError::Conflict { .. }) => {
                debug!("Incident opened concurrently, ignoring alert");
                return Ok(OpenOutcome::AlreadyOpen);
            }
            Err(e) => return Err(e),
        };

        let policy = self.policies.read_policy(service_id).await?;
        let first = policy.level(0).ok_or_else(|| PortError::Policy {
            reason: format!("escalation policy for service '{service_id}' has no levels"),
        })?;

        let sent = self.router.page_level(&incident, 0, first).await?;
        self.timer
            .start(service_id, self.config.ack_timeout_minutes)
            .await?;

        info!(
            notifications = sent,
            ack_timeout_minutes = self.config.ack_timeout_minutes,
            "Incident opened"
        );
        Ok(OpenOutcome::Opened(incident))
    }
}

#[async_trait]
impl AlertHandler for OpenIncidence {
    async fn open_incidence(
        &self,
        service_id: &ServiceId,
        alert_message: &str,
    ) -> PagerResult<()> {
        self.open(service_id, alert_message).await.map(|_| ())
    }
}
