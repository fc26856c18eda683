//! Engine configuration.

use tracing::warn;

/// Environment variable overriding the acknowledgement timeout.
const ENV_ACK_TIMEOUT_MINUTES: &str = "PAGER_ACK_TIMEOUT_MINUTES";

/// Minutes a target has to acknowledge before the next level is paged.
pub const DEFAULT_ACK_TIMEOUT_MINUTES: u32 = 15;

/// Tunables shared by the use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Countdown armed after every page
    pub ack_timeout_minutes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ack_timeout_minutes: DEFAULT_ACK_TIMEOUT_MINUTES,
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment variables.
    ///
    /// # Optional Environment Variables
    /// - `PAGER_ACK_TIMEOUT_MINUTES`: acknowledgement timeout (default: 15)
    ///
    /// Unparseable or zero values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let ack_timeout_minutes = match std::env::var(ENV_ACK_TIMEOUT_MINUTES) {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    warn!(
                        value = %raw,
                        default = DEFAULT_ACK_TIMEOUT_MINUTES,
                        "Invalid PAGER_ACK_TIMEOUT_MINUTES, using default"
                    );
                    DEFAULT_ACK_TIMEOUT_MINUTES
                }
            },
            Err(_) => DEFAULT_ACK_TIMEOUT_MINUTES,
        };

        Self {
            ack_timeout_minutes,
        }
    }

    /// Override the acknowledgement timeout.
    ///
    /// [`TokioTimer`](crate::TokioTimer) refuses to arm a zero timeout.
    #[must_use]
    pub const fn with_ack_timeout_minutes(mut self, minutes: u32) -> Self {
        self.ack_timeout_minutes = minutes;
        self
    }
}
