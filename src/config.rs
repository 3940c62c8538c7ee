//! Configuration for the rule-based fraud detector
//! Defaults mirror the thresholds the engine has always shipped with

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Amounts strictly above this are flagged outright
    pub amount_threshold: f64,

    /// Max transactions allowed in the velocity window before the
    /// transaction rate itself is considered suspicious
    pub suspicious_transaction_limit: u32,

    /// Trailing window for velocity queries, in hours
    pub velocity_window_hours: i64,

    /// Risk score (0.0 to 1.0) at or above which the strategy
    /// classifies a transaction as fraudulent
    pub risk_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            amount_threshold: 10_000.0,
            suspicious_transaction_limit: 5,
            velocity_window_hours: 24,
            risk_threshold: 0.8,
        }
    }
}

impl DetectorConfig {
    /// Preset for deployments that prefer more false positives over misses
    pub fn strict() -> Self {
        Self {
            amount_threshold: 2_500.0,
            suspicious_transaction_limit: 3,
            velocity_window_hours: 24,
            risk_threshold: 0.6,
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.amount_threshold <= 0.0 {
            return Err("Amount threshold must be positive".to_string());
        }

        if self.suspicious_transaction_limit == 0 {
            return Err("Suspicious transaction limit must be greater than 0".to_string());
        }

        if self.velocity_window_hours <= 0 {
            return Err("Velocity window must be at least one hour".to_string());
        }

        if !(0.0..=1.0).contains(&self.risk_threshold) {
            return Err("Risk threshold must be within 0.0 to 1.0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DetectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.amount_threshold, 10_000.0);
        assert_eq!(config.suspicious_transaction_limit, 5);
    }

    #[test]
    fn test_strict_config_is_valid() {
        let config = DetectorConfig::strict();
        assert!(config.validate().is_ok());
        assert!(config.amount_threshold < DetectorConfig::default().amount_threshold);
    }

    #[test]
    fn test_invalid_risk_threshold() {
        let mut config = DetectorConfig::default();
        config.risk_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_transaction_limit_rejected() {
        let mut config = DetectorConfig::default();
        config.suspicious_transaction_limit = 0;
        assert!(config.validate().is_err());
    }
}
