//! Update-incidence use cases: operator acknowledge and close.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::entities::{Incident, ServiceId};
use crate::errors::{PagerResult, PagerServiceError};
use crate::ports::ConsoleHandler;
use crate::storage::IncidentStore;

/// Console-driven transitions of an incident.
pub struct UpdateIncidence {
    store: Arc<dyn IncidentStore>,
}

impl UpdateIncidence {
    pub fn new(store: Arc<dyn IncidentStore>) -> Self {
        Self { store }
    }

    /// Mark the open incident as acknowledged, stopping further escalation.
    ///
    /// Acknowledging a healthy service is a caller error.
    #[instrument(skip(self), fields(service_id = %service_id))]
    pub async fn acknowledge(&self, service_id: &ServiceId) -> PagerResult<Incident> {
        self.try_acknowledge(service_id)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to acknowledge incident"))
    }

    async fn try_acknowledge(&self, service_id: &ServiceId) -> PagerResult<Incident> {
        let mut incident = self.store.read(service_id).await?.ok_or_else(|| {
            PagerServiceError::new(format!("No open incident for service '{service_id}'"))
        })?;

        incident.acknowledge();
        let incident = self.store.update(&incident).await?;
        info!(
            level = incident.current_escalation_level,
            "Incident acknowledged"
        );
        Ok(incident)
    }

    /// Close the incident, returning the service to healthy.
    ///
    /// Outstanding timers are not cancelled; their timeouts find no record and
    /// do nothing.
    #[instrument(skip(self), fields(service_id = %service_id))]
    pub async fn close(&self, service_id: &ServiceId) -> PagerResult<()> {
        self.store
            .delete(service_id)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to close incident"))?;
        info!("Incident closed");
        Ok(())
    }
}

#[async_trait]
impl ConsoleHandler for UpdateIncidence {
    async fn acknowledge_incidence(&self, service_id: &ServiceId) -> PagerResult<()> {
        self.acknowledge(service_id).await.map(|_| ())
    }

    async fn close_incidence(&self, service_id: &ServiceId) -> PagerResult<()> {
        self.close(service_id).await
    }
}
