//! In-memory incident store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::IncidentStore;
use crate::entities::{Incident, ServiceId};
use crate::errors::{PortError, PortResult};

/// Incident store backed by a process-local map.
///
/// Each call holds the write lock for its whole read-modify-write, which gives
/// the per-key atomicity the [`IncidentStore`] contract asks for.
#[derive(Default)]
pub struct InMemoryIncidentStore {
    incidents: RwLock<HashMap<ServiceId, Incident>>,
}

impl InMemoryIncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of services currently unhealthy
    pub async fn len(&self) -> usize {
        self.incidents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.incidents.read().await.is_empty()
    }
}

#[async_trait]
impl IncidentStore for InMemoryIncidentStore {
    fn storage_type(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, service_id: &ServiceId, alert_message: &str) -> PortResult<Incident> {
        let mut incidents = self.incidents.write().await;
        if incidents.contains_key(service_id) {
            return Err(PortError::Conflict {
                service_id: *service_id,
                reason: "incident already open".to_string(),
            });
        }

        let mut incident = Incident::open(*service_id, alert_message);
        incident.revision = 1;
        incidents.insert(*service_id, incident.clone());
        debug!(service_id = %service_id, "Incident record created");
        Ok(incident)
    }

    async fn read(&self, service_id: &ServiceId) -> PortResult<Option<Incident>> {
        Ok(self.incidents.read().await.get(service_id).cloned())
    }

    async fn update(&self, incident: &Incident) -> PortResult<Incident> {
        let mut incidents = self.incidents.write().await;
        let Some(stored) = incidents.get_mut(&incident.service_id) else {
            return Err(PortError::Conflict {
                service_id: incident.service_id,
                reason: "incident no longer open".to_string(),
            });
        };

        if stored.revision != incident.revision {
            return Err(PortError::Conflict {
                service_id: incident.service_id,
                reason: format!(
                    "stale revision {} (current {})",
                    incident.revision, stored.revision
                ),
            });
        }

        let mut updated = incident.clone();
        updated.revision = stored.revision + 1;
        *stored = updated.clone();
        debug!(
            service_id = %incident.service_id,
            revision = updated.revision,
            "Incident record updated"
        );
        Ok(updated)
    }

    async fn delete(&self, service_id: &ServiceId) -> PortResult<()> {
        if self.incidents.write().await.remove(service_id).is_some() {
            debug!(service_id = %service_id, "Incident record deleted");
        }
        Ok(())
    }
}
