//! Error types for the notification channels.

use pager::PortError;
use thiserror::Error;

/// Errors that can occur when delivering a notification to a gateway.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Channel is not configured
    #[error("Channel not configured: {0}")]
    NotConfigured(String),

    /// Rate limited by the gateway
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Gateway answered with a non-success status
    #[error("Gateway returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Target cannot be delivered by this channel
    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),
}

impl ChannelError {
    /// Convert into the pager's delivery failure for `channel`.
    pub fn into_port_error(self, channel: &str) -> PortError {
        PortError::Delivery {
            channel: channel.to_string(),
            reason: self.to_string(),
        }
    }
}
