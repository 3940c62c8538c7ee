//! Strategy contract for pluggable risk-scoring algorithms
//!
//! A strategy supplies its own score semantics and threshold; the derived
//! boolean check is implemented once here and shared by every variant.
//! Score scales are only comparable within a single strategy instance.

use crate::{Transaction, User};

pub trait RiskScoringStrategy: Send + Sync {
    /// Estimate fraud risk for a transaction and the user issuing it.
    /// Never fails: strategies degrade internally and return a definite score.
    fn calculate_fraud_risk(&self, transaction: &Transaction, user: &User) -> f64;

    /// Minimum risk score this strategy classifies as fraudulent
    fn threshold(&self) -> f64;

    /// Human-readable strategy name for auditing
    fn name(&self) -> &str;

    /// Threshold-based fraud determination; inclusive at the boundary, so a
    /// score exactly equal to the threshold counts as fraud.
    fn is_fraudulent(&self, transaction: &Transaction, user: &User) -> bool {
        self.calculate_fraud_risk(transaction, user) >= self.threshold()
    }
}
