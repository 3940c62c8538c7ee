//! Audit sink for swallowed store failures
//!
//! The engine never propagates store errors to callers, so the only trace of
//! a degraded answer is the event recorded here. The sink is an injected
//! capability rather than a global logger, which lets tests assert on what
//! was recorded without capturing process output.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StoreError;

/// Which fail-safe path produced the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditKind {
    /// Velocity query failed during `detect_fraud`; answered "not fraudulent"
    VelocityQueryFailed,
    /// Velocity query failed during `calculate_risk_score`; answered 0.0
    RiskScoreQueryFailed,
    /// `flag_user_suspicious` could not reach the store; flag not set
    FlagUserFailed,
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuditKind::VelocityQueryFailed => "velocity_query_failed",
            AuditKind::RiskScoreQueryFailed => "risk_score_query_failed",
            AuditKind::FlagUserFailed => "flag_user_failed",
        };
        f.write_str(name)
    }
}

/// One recorded fail-safe degradation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub kind: AuditKind,
    pub user_id: i64,
    pub error: String,
}

impl AuditEvent {
    pub fn new(kind: AuditKind, user_id: i64, error: &StoreError) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            kind,
            user_id,
            error: error.to_string(),
        }
    }
}

/// Capability the engine logs swallowed failures through
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Production sink; forwards events to the `tracing` subscriber
#[derive(Debug, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&self, event: AuditEvent) {
        tracing::warn!(
            event_id = %event.event_id,
            kind = %event.kind,
            user_id = event.user_id,
            error = %event.error,
            "fraud engine degraded to fail-safe default"
        );
    }
}

/// Buffering sink for tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("sink mutex poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("sink mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemorySink {
    fn record(&self, event: AuditEvent) {
        self.events.lock().expect("sink mutex poisoned").push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_buffers_events() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        let error = StoreError::Query { message: "bad column".to_string() };
        sink.record(AuditEvent::new(AuditKind::VelocityQueryFailed, 10, &error));

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AuditKind::VelocityQueryFailed);
        assert_eq!(events[0].user_id, 10);
        assert!(events[0].error.contains("bad column"));
    }

    #[test]
    fn test_events_get_distinct_ids() {
        let error = StoreError::Timeout { operation: "count".to_string() };
        let a = AuditEvent::new(AuditKind::FlagUserFailed, 1, &error);
        let b = AuditEvent::new(AuditKind::FlagUserFailed, 1, &error);
        assert_ne!(a.event_id, b.event_id);
    }
}
