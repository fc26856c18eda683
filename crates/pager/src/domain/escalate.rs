//! Escalate-incidence use case: an acknowledgement timeout elapsed.
//!
//! The policy is fetched again on every escalation rather than stored with the
//! incident, since it may be edited from the console while the incident is open.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::{Collaborators, NotificationRouter};
use crate::config::EngineConfig;
use crate::entities::ServiceId;
use crate::errors::{PagerResult, PortError, PortResult};
use crate::ports::{EscalationPolicyLookup, TimeoutHandler, TimerControl};
use crate::storage::IncidentStore;

/// Why a timeout did not page anyone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The service is healthy again (incident closed)
    NotOpen,
    /// An operator acknowledged the incident
    Acknowledged,
}

/// Result of handling a timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EscalationOutcome {
    /// The next level was paged and is now the current level
    Escalated { level: usize },
    /// The policy has no further level; its last level was paged again
    Repeated { level: usize },
    Skipped { reason: SkipReason },
}

/// Pages the next policy level of an unacknowledged incident.
pub struct EscalateIncidence {
    store: Arc<dyn IncidentStore>,
    policies: Arc<dyn EscalationPolicyLookup>,
    router: NotificationRouter,
    timer: Arc<dyn TimerControl>,
    config: EngineConfig,
}

impl EscalateIncidence {
    pub fn new(collaborators: &Collaborators, config: EngineConfig) -> Self {
        Self {
            store: Arc::clone(&collaborators.store),
            policies: Arc::clone(&collaborators.policies),
            router: collaborators.router(),
            timer: Arc::clone(&collaborators.timer),
            config,
        }
    }

    /// Handle an acknowledgement timeout for `service_id`.
    ///
    /// Closed or acknowledged incidents are left untouched. Past the last
    /// policy level the last level keeps being paged every timeout while the
    /// current level stays where it is.
    #[instrument(skip(self), fields(service_id = %service_id))]
    pub async fn escalate(&self, service_id: &ServiceId) -> PagerResult<EscalationOutcome> {
        self.try_escalate(service_id)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to escalate incident"))
            .map_err(Into::into)
    }

    async fn try_escalate(&self, service_id: &ServiceId) -> PortResult<EscalationOutcome> {
        let Some(mut incident) = self.store.read(service_id).await? else {
            debug!("Service is healthy, ignoring timeout");
            return Ok(EscalationOutcome::Skipped {
                reason: SkipReason::NotOpen,
            });
        };

        if !incident.is_escalatable() {
            debug!("Incident acknowledged, ignoring timeout");
            return Ok(EscalationOutcome::Skipped {
                reason: SkipReason::Acknowledged,
            });
        }

        let policy = self.policies.read_policy(service_id).await?;
        let last = policy.last_index().ok_or_else(|| PortError::Policy {
            reason: format!("escalation policy for service '{service_id}' has no levels"),
        })?;

        let next = incident.current_escalation_level + 1;
        let (index, advanced) = if next <= last {
            (next, true)
        } else {
            (last, false)
        };
        let level = policy.level(index).ok_or_else(|| PortError::Policy {
            reason: format!("escalation level {index} missing for service '{service_id}'"),
        })?;

        let sent = self.router.page_level(&incident, index, level).await?;
        self.timer
            .start(service_id, self.config.ack_timeout_minutes)
            .await?;

        if !advanced {
            info!(
                level = index,
                notifications = sent,
                "No further escalation level, paged last level again"
            );
            return Ok(EscalationOutcome::Repeated { level: index });
        }

        incident.record_notified_level(index);
        self.store.update(&incident).await?;

        info!(level = index, notifications = sent, "Incident escalated");
        Ok(EscalationOutcome::Escalated { level: index })
    }
}

#[async_trait]
impl TimeoutHandler for EscalateIncidence {
    async fn escalate_incidence(&self, service_id: &ServiceId) -> PagerResult<()> {
        self.escalate(service_id).await.map(|_| ())
    }
}
