//! Facade bundling the three use cases around one set of collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::EngineConfig;
use crate::domain::{
    Collaborators, EscalateIncidence, EscalationOutcome, OpenIncidence, OpenOutcome,
    UpdateIncidence,
};
use crate::entities::{Incident, ServiceId};
use crate::errors::PagerResult;
use crate::ports::{AlertHandler, ConsoleHandler, TimeoutHandler};

/// The pager escalation engine.
///
/// Cheap to share behind an [`Arc`]; every transport (alert ingestion, console,
/// timer dispatcher) can hold the same instance.
pub struct Pager {
    opener: OpenIncidence,
    escalator: EscalateIncidence,
    updater: UpdateIncidence,
}

impl Pager {
    pub fn new(collaborators: &Collaborators, config: EngineConfig) -> Self {
        info!(
            storage = collaborators.store.storage_type(),
            mail = collaborators.mail.name(),
            sms = collaborators.sms.name(),
            ack_timeout_minutes = config.ack_timeout_minutes,
            "Pager initialized"
        );

        Self {
            opener: OpenIncidence::new(collaborators, config),
            escalator: EscalateIncidence::new(collaborators, config),
            updater: UpdateIncidence::new(Arc::clone(&collaborators.store)),
        }
    }

    pub async fn open_incidence(
        &self,
        service_id: &ServiceId,
        alert_message: &str,
    ) -> PagerResult<OpenOutcome> {
        self.opener.open(service_id, alert_message).await
    }

    pub async fn escalate_incidence(
        &self,
        service_id: &ServiceId,
    ) -> PagerResult<EscalationOutcome> {
        self.escalator.escalate(service_id).await
    }

    pub async fn acknowledge_incidence(&self, service_id: &ServiceId) -> PagerResult<Incident> {
        self.updater.acknowledge(service_id).await
    }

    pub async fn close_incidence(&self, service_id: &ServiceId) -> PagerResult<()> {
        self.updater.close(service_id).await
    }
}

#[async_trait]
impl AlertHandler for Pager {
    async fn open_incidence(
        &self,
        service_id: &ServiceId,
        alert_message: &str,
    ) -> PagerResult<()> {
        self.opener.open_incidence(service_id, alert_message).await
    }
}

#[async_trait]
impl TimeoutHandler for Pager {
    async fn escalate_incidence(&self, service_id: &ServiceId) -> PagerResult<()> {
        self.escalator.escalate_incidence(service_id).await
    }
}

#[async_trait]
impl ConsoleHandler for Pager {
    async fn acknowledge_incidence(&self, service_id: &ServiceId) -> PagerResult<()> {
        self.updater.acknowledge_incidence(service_id).await
    }

    async fn close_incidence(&self, service_id: &ServiceId) -> PagerResult<()> {
        self.updater.close_incidence(service_id).await
    }
}
