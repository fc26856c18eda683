//! Shared test doubles for the pager integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use pager::{
    Collaborators, EngineConfig, EscalationLevel, EscalationPolicy, EscalationPolicyLookup,
    InMemoryIncidentStore, Notification, NotificationSender, Pager, PortError, PortResult,
    ServiceId, StaticPolicyLookup, Target, TimerControl,
};

static TRACING: Once = Once::new();

/// Route engine logs through the test writer (`RUST_LOG=pager=debug`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Sender that records every notification it is asked to deliver.
pub struct RecordingSender {
    name: &'static str,
    sent: Mutex<Vec<Notification>>,
    fail_with: Option<String>,
}

impl RecordingSender {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sent: Mutex::new(vec![]),
            fail_with: None,
        }
    }

    pub fn failing(name: &'static str, reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::new(name)
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .map(|n| n.target.recipient)
            .collect()
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn send(&self, notification: &Notification) -> PortResult<()> {
        if let Some(reason) = &self.fail_with {
            return Err(PortError::Delivery {
                channel: self.name.to_string(),
                reason: reason.clone(),
            });
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Timer that only records what was armed.
#[derive(Default)]
pub struct RecordingTimer {
    armed: Mutex<Vec<(ServiceId, u32)>>,
}

impl RecordingTimer {
    pub fn armed(&self) -> Vec<(ServiceId, u32)> {
        self.armed.lock().unwrap().clone()
    }
}

#[async_trait]
impl TimerControl for RecordingTimer {
    async fn start(&self, service_id: &ServiceId, minutes: u32) -> PortResult<()> {
        self.armed.lock().unwrap().push((*service_id, minutes));
        Ok(())
    }
}

/// Policy lookup that counts how often it is consulted.
pub struct CountingPolicies {
    inner: StaticPolicyLookup,
    lookups: AtomicUsize,
}

impl CountingPolicies {
    pub fn new(policies: impl IntoIterator<Item = EscalationPolicy>) -> Self {
        Self {
            inner: StaticPolicyLookup::new(policies),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub async fn replace(&self, policy: EscalationPolicy) {
        self.inner.upsert(policy).await;
    }
}

#[async_trait]
impl EscalationPolicyLookup for CountingPolicies {
    async fn read_policy(&self, service_id: &ServiceId) -> PortResult<EscalationPolicy> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.read_policy(service_id).await
    }
}

/// Three levels: email + SMS, email + SMS, email only.
pub fn three_level_policy(service_id: ServiceId) -> EscalationPolicy {
    EscalationPolicy::new(
        service_id,
        vec![
            EscalationLevel::new(
                0,
                vec![Target::email("oncall@example.com"), Target::sms("+15550100")],
            ),
            EscalationLevel::new(
                1,
                vec![Target::email("lead@example.com"), Target::sms("+15550101")],
            ),
            EscalationLevel::new(2, vec![Target::email("director@example.com")]),
        ],
    )
}

/// A pager wired to recording doubles and an in-memory store.
pub struct Harness {
    pub service_id: ServiceId,
    pub store: Arc<InMemoryIncidentStore>,
    pub policies: Arc<CountingPolicies>,
    pub mail: Arc<RecordingSender>,
    pub sms: Arc<RecordingSender>,
    pub timer: Arc<RecordingTimer>,
    pub pager: Pager,
}

impl Harness {
    pub fn new() -> Self {
        let service_id = ServiceId::random();
        Self::with_policy(service_id, three_level_policy(service_id))
    }

    pub fn with_policy(service_id: ServiceId, policy: EscalationPolicy) -> Self {
        init_tracing();

        let store = Arc::new(InMemoryIncidentStore::new());
        let policies = Arc::new(CountingPolicies::new([policy]));
        let mail = Arc::new(RecordingSender::new("mail"));
        let sms = Arc::new(RecordingSender::new("sms"));
        let timer = Arc::new(RecordingTimer::default());

        let collaborators = Collaborators {
            store: store.clone(),
            policies: policies.clone(),
            mail: mail.clone(),
            sms: sms.clone(),
            timer: timer.clone(),
        };
        let pager = Pager::new(&collaborators, EngineConfig::default());

        Self {
            service_id,
            store,
            policies,
            mail,
            sms,
            timer,
            pager,
        }
    }

    pub fn notification_count(&self) -> usize {
        self.mail.sent().len() + self.sms.sent().len()
    }
}
