//! Capability interfaces at the engine's boundary.
//!
//! Outbound ports are implemented by adapters (gateways, timers, policy
//! services); inbound ports are implemented by the use cases and are what a
//! transport such as an alert webhook, a web console, or a timer binds to.

use async_trait::async_trait;

use crate::entities::{EscalationPolicy, Notification, ServiceId};
use crate::errors::{PagerResult, PortResult};

// =========================================================================
// Outbound
// =========================================================================

/// Looks up the current escalation policy of a service.
#[async_trait]
pub trait EscalationPolicyLookup: Send + Sync {
    async fn read_policy(&self, service_id: &ServiceId) -> PortResult<EscalationPolicy>;
}

/// Delivers one notification to one target (mail or SMS gateway).
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Get the name of this sender.
    fn name(&self) -> &'static str;

    /// Send a single notification. No retries are expected.
    async fn send(&self, notification: &Notification) -> PortResult<()>;
}

/// Arms acknowledgement countdowns.
///
/// When a countdown elapses the implementation must deliver a timeout for the
/// service to a [`TimeoutHandler`]. There is no cancel: acknowledgement and
/// close make the next timeout a no-op instead.
#[async_trait]
pub trait TimerControl: Send + Sync {
    async fn start(&self, service_id: &ServiceId, minutes: u32) -> PortResult<()>;
}

// =========================================================================
// Inbound
// =========================================================================

/// Entry point for alerts raised by monitored services.
#[async_trait]
pub trait AlertHandler: Send + Sync {
    async fn open_incidence(&self, service_id: &ServiceId, alert_message: &str)
        -> PagerResult<()>;
}

/// Entry point for operator actions from the console.
#[async_trait]
pub trait ConsoleHandler: Send + Sync {
    async fn acknowledge_incidence(&self, service_id: &ServiceId) -> PagerResult<()>;

    async fn close_incidence(&self, service_id: &ServiceId) -> PagerResult<()>;
}

/// Entry point for elapsed acknowledgement timers.
#[async_trait]
pub trait TimeoutHandler: Send + Sync {
    async fn escalate_incidence(&self, service_id: &ServiceId) -> PagerResult<()>;
}
