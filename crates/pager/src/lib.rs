#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

//! # Pager
//!
//! Escalation engine deciding, per monitored service, whom to page while the
//! service is unhealthy and how paging escalates until someone acknowledges.
//!
//! This crate provides:
//! - The incident lifecycle: open, escalate on acknowledgement timeout,
//!   acknowledge, close
//! - Ports for the store, policy lookup, mail/SMS senders and timer
//! - An in-memory compare-and-set store, a static policy lookup, and a
//!   tokio-backed timer with its timeout dispatcher
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pager::{Collaborators, EngineConfig, InMemoryIncidentStore, Pager,
//!             StaticPolicyLookup, TimeoutDispatcher, TokioTimer};
//!
//! let (timer, timeouts) = TokioTimer::new();
//! let collaborators = Collaborators {
//!     store: Arc::new(InMemoryIncidentStore::new()),
//!     policies: Arc::new(StaticPolicyLookup::from_json(&policies_json)?),
//!     mail: notify::channel_from_env(TargetKind::Email),
//!     sms: notify::channel_from_env(TargetKind::Sms),
//!     timer: Arc::new(timer),
//! };
//! let pager = Arc::new(Pager::new(&collaborators, EngineConfig::from_env()));
//! TimeoutDispatcher::new(timeouts, pager.clone()).spawn();
//!
//! pager.open_incidence(&service_id, "HTTP 503 on /health").await?;
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! HEALTHY --(alert)--> UNHEALTHY(level 0)
//! UNHEALTHY(L) --(timeout, not acked)--> UNHEALTHY(L+1)   re-pages, re-arms
//! UNHEALTHY(L) --(acknowledge)--> UNHEALTHY(L, acked)    timeouts ignored
//! UNHEALTHY --(close)--> HEALTHY
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Collaborator and entry-point traits
pub mod ports;

// Storage layer
pub mod storage;

// Policy lookup
pub mod policies;

// Use cases
pub mod domain;

pub mod config;
pub mod engine;
pub mod timer;

pub use config::EngineConfig;
pub use domain::{
    Collaborators, EscalateIncidence, EscalationOutcome, NotificationRouter, OpenIncidence,
    OpenOutcome, SkipReason, UpdateIncidence,
};
pub use engine::Pager;
pub use entities::{
    EscalationLevel, EscalationPolicy, Incident, Notification, ServiceId, Target, TargetKind,
};
pub use errors::{PagerResult, PagerServiceError, PortError, PortResult};
pub use policies::StaticPolicyLookup;
pub use ports::{
    AlertHandler, ConsoleHandler, EscalationPolicyLookup, NotificationSender, TimeoutHandler,
    TimerControl,
};
pub use storage::{InMemoryIncidentStore, IncidentStore};
pub use timer::{TimeoutDispatcher, TimeoutReceiver, TimeoutSignal, TokioTimer};
