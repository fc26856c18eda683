//! Mail and SMS delivery channels for the pager.
//!
//! This crate provides the [`NotificationSender`] implementations that the
//! escalation engine uses to reach on-call targets. Each target kind is
//! delivered through an HTTP gateway webhook; when no gateway is configured the
//! notification is only logged.
//!
//! # Usage
//!
//! ```no_run
//! use notify::Channels;
//!
//! // Create mail and SMS channels from environment variables
//! let channels = Channels::from_env();
//!
//! // Hand them to the engine collaborators
//! let (mail, sms) = (channels.mail, channels.sms);
//! ```
//!
//! # Configuration
//!
//! The channels are configured via environment variables:
//!
//! - `PAGER_MAIL_WEBHOOK_URL`: mail gateway webhook URL (enables mail delivery)
//! - `PAGER_SMS_WEBHOOK_URL`: SMS gateway webhook URL (enables SMS delivery)
//! - `PAGER_NOTIFY_DISABLED`: Set to "true" to log notifications instead of sending them

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod error;

pub use channels::log::LogChannel;
pub use channels::webhook::WebhookChannel;
pub use error::ChannelError;

use std::sync::Arc;

use pager::{NotificationSender, TargetKind};
use tracing::info;

/// Environment variable to disable all gateway delivery.
const ENV_NOTIFY_DISABLED: &str = "PAGER_NOTIFY_DISABLED";

/// The mail and SMS senders handed to the escalation engine.
#[derive(Clone)]
pub struct Channels {
    pub mail: Arc<dyn NotificationSender>,
    pub sms: Arc<dyn NotificationSender>,
}

impl Channels {
    /// Create both channels from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let channels = Self {
            mail: channel_from_env(TargetKind::Email),
            sms: channel_from_env(TargetKind::Sms),
        };

        info!(
            mail = channels.mail.name(),
            sms = channels.sms.name(),
            "Notification channels initialized"
        );

        channels
    }

    /// Create channels that only log.
    #[must_use]
    pub fn log_only() -> Self {
        Self {
            mail: Arc::new(LogChannel::new(TargetKind::Email)),
            sms: Arc::new(LogChannel::new(TargetKind::Sms)),
        }
    }
}

/// Pick the sender for `kind` based on the environment.
///
/// Returns a [`WebhookChannel`] when its URL is set and delivery is not
/// disabled, otherwise a [`LogChannel`].
#[must_use]
pub fn channel_from_env(kind: TargetKind) -> Arc<dyn NotificationSender> {
    if notifications_disabled() {
        info!(channel = %kind, "Gateway delivery disabled via {ENV_NOTIFY_DISABLED}");
        return Arc::new(LogChannel::new(kind));
    }

    let webhook = WebhookChannel::from_env(kind);
    if webhook.enabled() {
        Arc::new(webhook)
    } else {
        Arc::new(LogChannel::new(kind))
    }
}

fn notifications_disabled() -> bool {
    std::env::var(ENV_NOTIFY_DISABLED)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}
