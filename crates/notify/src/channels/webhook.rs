//! HTTP gateway channel for mail or SMS delivery.
//!
//! Posts one JSON document per notification to a gateway that owns the actual
//! SMTP or carrier integration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pager::{Notification, NotificationSender, PortResult, ServiceId, TargetKind};
use serde::Serialize;
use tracing::{debug, warn};

use super::format_age;
use crate::error::ChannelError;

/// Environment variable for the mail gateway webhook URL.
pub(crate) const ENV_MAIL_WEBHOOK_URL: &str = "PAGER_MAIL_WEBHOOK_URL";

/// Environment variable for the SMS gateway webhook URL.
pub(crate) const ENV_SMS_WEBHOOK_URL: &str = "PAGER_SMS_WEBHOOK_URL";

/// Gateway webhook channel for one target kind.
pub struct WebhookChannel {
    kind: TargetKind,
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl WebhookChannel {
    /// Create a channel for `kind` from environment variables.
    #[must_use]
    pub fn from_env(kind: TargetKind) -> Self {
        let var = env_var_for(kind);
        let webhook_url = std::env::var(var).ok().filter(|url| !url.trim().is_empty());

        if webhook_url.is_some() {
            debug!(channel = %kind, "Gateway webhook configured");
        } else {
            debug!(channel = %kind, "Gateway webhook disabled ({var} not set)");
        }

        Self {
            kind,
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a channel with a specific webhook URL.
    #[must_use]
    pub fn new(kind: TargetKind, webhook_url: impl Into<String>) -> Self {
        Self {
            kind,
            webhook_url: Some(webhook_url.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Check if a webhook URL is configured.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Build the gateway payload for a notification.
    fn format_payload(notification: &Notification) -> GatewayPayload<'_> {
        let incident = &notification.incident;
        let text = format!(
            "{}\nUnhealthy for {}, escalation level {}.",
            incident.alert_message,
            format_age(Utc::now() - incident.opened_at),
            notification.level
        );

        GatewayPayload {
            kind: notification.target.kind,
            recipient: &notification.target.recipient,
            subject: notification.subject(),
            text,
            service_id: incident.service_id,
            escalation_level: notification.level,
            opened_at: incident.opened_at,
        }
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ChannelError> {
        let webhook_url = self
            .webhook_url
            .as_ref()
            .ok_or_else(|| ChannelError::NotConfigured(env_var_for(self.kind).to_string()))?;

        if notification.target.kind != self.kind {
            return Err(ChannelError::UnsupportedTarget(format!(
                "{} target sent to {} channel",
                notification.target.kind, self.kind
            )));
        }

        let payload = Self::format_payload(notification);

        debug!(
            channel = %self.kind,
            service_id = %notification.incident.service_id,
            "Sending notification"
        );

        let response = self.client.post(webhook_url).json(&payload).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            return Err(ChannelError::RateLimited { retry_after_secs });
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            channel = %self.kind,
            status = %status,
            body = %body,
            "Gateway webhook request failed"
        );

        Err(ChannelError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl NotificationSender for WebhookChannel {
    fn name(&self) -> &'static str {
        match self.kind {
            TargetKind::Email => "mail-webhook",
            TargetKind::Sms => "sms-webhook",
        }
    }

    async fn send(&self, notification: &Notification) -> PortResult<()> {
        self.deliver(notification)
            .await
            .map_err(|e| e.into_port_error(self.name()))
    }
}

pub(crate) const fn env_var_for(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Email => ENV_MAIL_WEBHOOK_URL,
        TargetKind::Sms => ENV_SMS_WEBHOOK_URL,
    }
}

// =============================================================================
// Gateway API types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GatewayPayload<'a> {
    kind: TargetKind,
    recipient: &'a str,
    subject: String,
    text: String,
    service_id: ServiceId,
    escalation_level: usize,
    opened_at: DateTime<Utc>,
}
