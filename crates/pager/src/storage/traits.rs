//! Storage trait definitions.

use async_trait::async_trait;

use crate::entities::{Incident, ServiceId};
use crate::errors::PortResult;

/// Storage interface for open incidents, keyed by service.
///
/// Implementations must make every call atomic per service id:
///
/// - `create` fails with [`PortError::Conflict`](crate::errors::PortError::Conflict)
///   when a record already exists.
/// - `update` succeeds only when the stored revision equals `incident.revision`,
///   and returns the record with its revision bumped. Updating a record that no
///   longer exists is a conflict.
/// - `delete` of an absent record is a no-op.
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Get storage type identifier
    fn storage_type(&self) -> &'static str;

    /// Insert a fresh unacknowledged incident at level 0
    async fn create(&self, service_id: &ServiceId, alert_message: &str) -> PortResult<Incident>;

    /// Load the open incident for a service, `None` when the service is healthy
    async fn read(&self, service_id: &ServiceId) -> PortResult<Option<Incident>>;

    /// Compare-and-set write of an incident
    async fn update(&self, incident: &Incident) -> PortResult<Incident>;

    /// Remove the incident, returning the service to healthy
    async fn delete(&self, service_id: &ServiceId) -> PortResult<()>;
}
