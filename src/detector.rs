//! Rule-based fraud detection engine
//!
//! Combines four independent signals into a fraud determination and exposes a
//! separate velocity-derived risk score. The two public decision procedures
//! are deliberately distinct: `detect_fraud` is a short-circuit OR over the
//! rules, while `is_fraudulent` (via [`RiskScoringStrategy`]) compares the
//! risk score against the configured threshold.
//!
//! Store failures never escape: every public operation degrades to its
//! fail-safe default (not fraudulent, zero score, flag not set) and records
//! one event on the audit sink.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::audit::{AuditEvent, AuditKind, AuditSink, TracingSink};
use crate::config::DetectorConfig;
use crate::errors::StoreResult;
use crate::store::TransactionHistoryStore;
use crate::strategy::RiskScoringStrategy;
use crate::{Transaction, User};

pub struct RuleBasedDetector {
    config: DetectorConfig,
    store: Arc<dyn TransactionHistoryStore>,
    audit: Arc<dyn AuditSink>,
}

impl RuleBasedDetector {
    /// Create a detector bound to a history store, logging through `tracing`
    pub fn new(config: DetectorConfig, store: Arc<dyn TransactionHistoryStore>) -> Self {
        Self::with_sink(config, store, Arc::new(TracingSink))
    }

    /// Create a detector with an explicit audit sink
    pub fn with_sink(
        config: DetectorConfig,
        store: Arc<dyn TransactionHistoryStore>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self { config, store, audit }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect fraud as a short-circuit OR over the rules, cheapest first:
    /// amount, prior fraud history, transaction velocity, missing location.
    ///
    /// A velocity-query failure makes the whole call answer `false` rather
    /// than propagating; availability wins over false positives.
    pub fn detect_fraud(&self, transaction: &Transaction, user: &User) -> bool {
        // Amount rule is strict: exactly at the threshold is not flagged
        if transaction.amount > self.config.amount_threshold {
            return true;
        }

        // Any prior confirmed fraud makes every later transaction suspect
        if user.fraud_count > 0 {
            return true;
        }

        match self.recent_transaction_count(user.user_id) {
            Ok(count) => {
                if count > self.config.suspicious_transaction_limit {
                    return true;
                }
            }
            Err(error) => {
                self.audit.record(AuditEvent::new(
                    AuditKind::VelocityQueryFailed,
                    user.user_id,
                    &error,
                ));
                return false;
            }
        }

        !transaction.has_location()
    }

    /// Velocity-derived risk score in [0.0, 1.0]
    ///
    /// `min(recent_count / suspicious_transaction_limit, 1.0)`; saturates once
    /// the window holds at least the limit. A store failure scores 0.0.
    pub fn calculate_risk_score(&self, user_id: i64) -> f64 {
        match self.recent_transaction_count(user_id) {
            Ok(count) => {
                let ratio = f64::from(count) / f64::from(self.config.suspicious_transaction_limit);
                ratio.min(1.0)
            }
            Err(error) => {
                self.audit.record(AuditEvent::new(
                    AuditKind::RiskScoreQueryFailed,
                    user_id,
                    &error,
                ));
                0.0
            }
        }
    }

    /// Best-effort command to mark the user suspicious in the store
    ///
    /// Idempotent; a store failure is audited and swallowed, not retried.
    pub fn flag_user_suspicious(&self, user_id: i64) {
        if let Err(error) = self.store.set_user_suspicious(user_id, true) {
            self.audit
                .record(AuditEvent::new(AuditKind::FlagUserFailed, user_id, &error));
        }
    }

    fn recent_transaction_count(&self, user_id: i64) -> StoreResult<u32> {
        let window_start = Utc::now() - Duration::hours(self.config.velocity_window_hours);
        self.store.count_recent_transactions(user_id, window_start)
    }
}

impl RiskScoringStrategy for RuleBasedDetector {
    fn calculate_fraud_risk(&self, _transaction: &Transaction, user: &User) -> f64 {
        self.calculate_risk_score(user.user_id)
    }

    fn threshold(&self) -> f64 {
        self.config.risk_threshold
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}
