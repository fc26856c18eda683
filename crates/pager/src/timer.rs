//! Tokio-backed acknowledgement timers.
//!
//! [`TokioTimer`] arms a countdown per call and, when it elapses, enqueues a
//! [`TimeoutSignal`]. A [`TimeoutDispatcher`] drains those signals into a
//! [`TimeoutHandler`], which is normally the escalate use case. Timers are
//! never cancelled; a timeout for an acknowledged or closed incident is
//! ignored by the handler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::entities::ServiceId;
use crate::errors::{PortError, PortResult};
use crate::ports::{TimeoutHandler, TimerControl};

/// An elapsed acknowledgement countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSignal {
    pub service_id: ServiceId,
    pub minutes: u32,
}

/// Receiving half handed to the [`TimeoutDispatcher`]
pub type TimeoutReceiver = mpsc::UnboundedReceiver<TimeoutSignal>;

/// Timer control that sleeps on the tokio runtime.
#[derive(Clone)]
pub struct TokioTimer {
    signals: mpsc::UnboundedSender<TimeoutSignal>,
}

impl TokioTimer {
    /// Create a timer and the receiver its timeouts are delivered to.
    #[must_use]
    pub fn new() -> (Self, TimeoutReceiver) {
        let (signals, receiver) = mpsc::unbounded_channel();
        (Self { signals }, receiver)
    }
}

#[async_trait]
impl TimerControl for TokioTimer {
    async fn start(&self, service_id: &ServiceId, minutes: u32) -> PortResult<()> {
        if minutes == 0 {
            return Err(PortError::Timer {
                reason: "acknowledgement timeout must be at least one minute".to_string(),
            });
        }

        if self.signals.is_closed() {
            return Err(PortError::Timer {
                reason: "timeout dispatcher is not running".to_string(),
            });
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| PortError::Timer {
            reason: e.to_string(),
        })?;

        let signal = TimeoutSignal {
            service_id: *service_id,
            minutes,
        };
        let signals = self.signals.clone();

        runtime.spawn(async move {
            tokio::time::sleep(Duration::from_secs(u64::from(minutes) * 60)).await;
            if signals.send(signal).is_err() {
                warn!(
                    service_id = %signal.service_id,
                    "Timeout dropped, dispatcher has stopped"
                );
            }
        });

        debug!(service_id = %service_id, minutes, "Acknowledgement timer armed");
        Ok(())
    }
}

/// Delivers elapsed timeouts to a [`TimeoutHandler`].
pub struct TimeoutDispatcher {
    receiver: TimeoutReceiver,
    handler: Arc<dyn TimeoutHandler>,
}

impl TimeoutDispatcher {
    pub fn new(receiver: TimeoutReceiver, handler: Arc<dyn TimeoutHandler>) -> Self {
        Self { receiver, handler }
    }

    /// Run until every [`TokioTimer`] clone and pending countdown is gone.
    ///
    /// Each timeout is handled on its own task so a slow gateway for one
    /// service does not delay escalation of another. Failures are logged;
    /// the next trigger is relied on for recovery.
    pub async fn run(mut self) {
        info!("Timeout dispatcher started");

        while let Some(signal) = self.receiver.recv().await {
            let handler = Arc::clone(&self.handler);

            tokio::spawn(async move {
                debug!(
                    service_id = %signal.service_id,
                    minutes = signal.minutes,
                    "Acknowledgement timeout elapsed"
                );
                if let Err(e) = handler.escalate_incidence(&signal.service_id).await {
                    error!(
                        service_id = %signal.service_id,
                        error = %e,
                        "Escalation after timeout failed"
                    );
                }
            });
        }

        info!("Timeout dispatcher stopped");
    }

    /// Spawn [`run`](Self::run) on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
