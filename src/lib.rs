//! FraudGuard - A pluggable fraud-risk-scoring engine for financial transactions
//!
//! Given a transaction and the user who issued it, the engine combines several
//! independent signals (amount, prior fraud history, transaction velocity,
//! location plausibility) into a risk score and a binary fraud determination:
//! - Rule-based detection with a strategy abstraction for alternative algorithms
//! - A narrow transaction-history store contract with an in-memory reference store
//! - Fail-safe degradation: store failures log and score as non-fraudulent
//! - An injected audit sink so swallowed failures stay observable

pub mod audit;
pub mod config;
pub mod detector;
pub mod errors;
pub mod store;
pub mod strategy;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use audit::{AuditEvent, AuditKind, AuditSink, MemorySink, TracingSink};
pub use config::DetectorConfig;
pub use detector::RuleBasedDetector;
pub use errors::StoreError;
pub use store::{InMemoryHistoryStore, TransactionHistoryStore};
pub use strategy::RiskScoringStrategy;

/// A single observed payment event
///
/// Immutable after construction except for `flagged`, which the detection
/// engine may set after evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub merchant: String,
    pub timestamp: DateTime<Utc>,
    /// Where the payment was made; `None` or an empty string is itself a signal
    pub location: Option<String>,
    pub flagged: bool,
}

impl Transaction {
    pub fn new(
        transaction_id: i64,
        user_id: i64,
        amount: f64,
        merchant: impl Into<String>,
        timestamp: DateTime<Utc>,
        location: Option<String>,
    ) -> Self {
        Self {
            transaction_id,
            user_id,
            amount,
            merchant: merchant.into(),
            timestamp,
            location,
            flagged: false,
        }
    }

    pub fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }

    /// True when the transaction carries a usable location
    pub fn has_location(&self) -> bool {
        self.location.as_deref().is_some_and(|loc| !loc.is_empty())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction[id={}, user={}, amount={:.2}, merchant={}, time={}, location={}, flagged={}]",
            self.transaction_id,
            self.user_id,
            self.amount,
            self.merchant,
            self.timestamp,
            self.location.as_deref().unwrap_or("<none>"),
            self.flagged
        )
    }
}

/// An account holder observed by the engine
///
/// Contact fields are opaque strings; format validation happens upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_suspicious: bool,
    /// Confirmed fraud incidents; monotonically non-decreasing
    pub fraud_count: u32,
}

impl User {
    pub fn new(
        user_id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            is_suspicious: false,
            fraud_count: 0,
        }
    }

    pub fn set_suspicious(&mut self, suspicious: bool) {
        self.is_suspicious = suspicious;
    }

    pub fn increment_fraud_count(&mut self) {
        self.fraud_count += 1;
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User[id={}, name={}, email={}, phone={}, suspicious={}, fraud_count={}]",
            self.user_id, self.name, self.email, self.phone, self.is_suspicious, self.fraud_count
        )
    }
}
