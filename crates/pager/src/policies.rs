//! In-memory escalation policy lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::entities::{EscalationPolicy, ServiceId};
use crate::errors::{PortError, PortResult};
use crate::ports::EscalationPolicyLookup;

/// JSON document accepted by [`StaticPolicyLookup::from_json`]
#[derive(Debug, Deserialize)]
struct PolicyDocument {
    policies: Vec<EscalationPolicy>,
}

/// Policy lookup over a fixed set of policies.
///
/// Policies can be replaced at any time; every lookup returns the latest
/// version, so an incident that is already open picks up edits on its next
/// escalation.
#[derive(Default)]
pub struct StaticPolicyLookup {
    policies: RwLock<HashMap<ServiceId, EscalationPolicy>>,
}

impl StaticPolicyLookup {
    pub fn new(policies: impl IntoIterator<Item = EscalationPolicy>) -> Self {
        Self {
            policies: RwLock::new(
                policies
                    .into_iter()
                    .map(|p| (p.service_id, p))
                    .collect(),
            ),
        }
    }

    /// Parse a `{"policies": [...]}` document
    pub fn from_json(json: &str) -> PortResult<Self> {
        let document: PolicyDocument =
            serde_json::from_str(json).map_err(|e| PortError::Policy {
                reason: format!("invalid policy document: {e}"),
            })?;
        Ok(Self::new(document.policies))
    }

    /// Insert or replace the policy of a service
    pub async fn upsert(&self, policy: EscalationPolicy) {
        debug!(service_id = %policy.service_id, levels = policy.levels.len(), "Policy stored");
        self.policies.write().await.insert(policy.service_id, policy);
    }
}

#[async_trait]
impl EscalationPolicyLookup for StaticPolicyLookup {
    async fn read_policy(&self, service_id: &ServiceId) -> PortResult<EscalationPolicy> {
        self.policies
            .read()
            .await
            .get(service_id)
            .cloned()
            .ok_or_else(|| PortError::Policy {
                reason: format!("no escalation policy for service '{service_id}'"),
            })
    }
}
