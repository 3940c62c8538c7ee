//! Error handling for the fraud-risk engine
//!
//! Store failures never cross the engine's public operations; they degrade to
//! fail-safe defaults and an audit event. The taxonomy here exists for the
//! store boundary and for callers that talk to a store directly.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store connection failed: {message}")]
    Connection { message: String },

    #[error("Store query failed: {message}")]
    Query { message: String },

    #[error("Store operation timed out: {operation}")]
    Timeout { operation: String },
}

impl StoreError {
    /// Check if the failure is transient (a retry may succeed)
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Connection { .. } | StoreError::Timeout { .. }
        )
    }

    /// Get severity level for logging
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::Query { .. } => ErrorSeverity::High,
            StoreError::Connection { .. } | StoreError::Timeout { .. } => ErrorSeverity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

// Convenience type alias for store-facing operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
