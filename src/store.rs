//! Transaction-history store boundary
//!
//! The engine reads persisted history through a two-operation contract and
//! never sees the storage engine behind it. Any backend with a transaction
//! table keyed by `user_id` and `timestamp` and a user table with an
//! `is_suspicious` column can sit behind this trait; the in-memory store
//! here is the reference implementation used by tests and the demo CLI.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::errors::StoreResult;
#[cfg(test)]
use crate::errors::StoreError;
use crate::{Transaction, User};

/// Narrow query contract the engine holds against persisted history
pub trait TransactionHistoryStore: Send + Sync {
    /// Count a user's transactions with timestamp strictly after
    /// `window_start`. Returns 0 for a user with no history.
    fn count_recent_transactions(
        &self,
        user_id: i64,
        window_start: DateTime<Utc>,
    ) -> StoreResult<u32>;

    /// Set the suspicious flag on the one user row keyed by `user_id`.
    /// A missing user is a no-op, not an error.
    fn set_user_suspicious(&self, user_id: i64, suspicious: bool) -> StoreResult<()>;
}

/// In-memory history store honoring the query contract
///
/// State sits behind a single mutex so the store is safe for concurrent
/// callers; every lock is scoped to one operation and released on all paths.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    inner: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<i64, User>,
    // user_id -> that user's transactions, insertion order
    transactions: HashMap<i64, Vec<Transaction>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, user: User) {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        state.users.insert(user.user_id, user);
    }

    pub fn record_transaction(&self, transaction: Transaction) {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        state
            .transactions
            .entry(transaction.user_id)
            .or_default()
            .push(transaction);
    }

    /// Fresh read of a user row, if present
    pub fn user(&self, user_id: i64) -> Option<User> {
        let state = self.inner.lock().expect("store mutex poisoned");
        state.users.get(&user_id).cloned()
    }

    pub fn transaction_count(&self, user_id: i64) -> usize {
        let state = self.inner.lock().expect("store mutex poisoned");
        state.transactions.get(&user_id).map_or(0, Vec::len)
    }
}

impl TransactionHistoryStore for InMemoryHistoryStore {
    fn count_recent_transactions(
        &self,
        user_id: i64,
        window_start: DateTime<Utc>,
    ) -> StoreResult<u32> {
        let state = self.inner.lock().expect("store mutex poisoned");
        let count = state
            .transactions
            .get(&user_id)
            .map_or(0, |txs| txs.iter().filter(|tx| tx.timestamp > window_start).count());
        Ok(count as u32)
    }

    fn set_user_suspicious(&self, user_id: i64, suspicious: bool) -> StoreResult<()> {
        let mut state = self.inner.lock().expect("store mutex poisoned");
        if let Some(user) = state.users.get_mut(&user_id) {
            user.set_suspicious(suspicious);
        }
        Ok(())
    }
}

/// Store stub whose queries always fail; used to exercise fail-safe paths
#[cfg(test)]
pub(crate) struct FailingStore {
    pub error: StoreError,
}

#[cfg(test)]
impl FailingStore {
    pub fn timeout() -> Self {
        Self {
            error: StoreError::Timeout {
                operation: "count_recent_transactions".to_string(),
            },
        }
    }
}

#[cfg(test)]
impl TransactionHistoryStore for FailingStore {
    fn count_recent_transactions(
        &self,
        _user_id: i64,
        _window_start: DateTime<Utc>,
    ) -> StoreResult<u32> {
        Err(self.error.clone())
    }

    fn set_user_suspicious(&self, _user_id: i64, _suspicious: bool) -> StoreResult<()> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tx_at(id: i64, user_id: i64, timestamp: DateTime<Utc>) -> Transaction {
        Transaction::new(id, user_id, 100.0, "Corner Store", timestamp, Some("NYC".into()))
    }

    #[test]
    fn test_count_is_strictly_after_window_start() {
        let store = InMemoryHistoryStore::new();
        let now = Utc::now();
        let window_start = now - Duration::hours(24);

        store.record_transaction(tx_at(1, 10, now - Duration::hours(1)));
        store.record_transaction(tx_at(2, 10, window_start)); // exactly at boundary
        store.record_transaction(tx_at(3, 10, now - Duration::hours(30)));

        let count = store.count_recent_transactions(10, window_start).unwrap();
        assert_eq!(count, 1);
        // All three stay recorded; the window only narrows the count
        assert_eq!(store.transaction_count(10), 3);
    }

    #[test]
    fn test_unknown_user_counts_zero() {
        let store = InMemoryHistoryStore::new();
        let count = store
            .count_recent_transactions(999, Utc::now() - Duration::hours(24))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_set_user_suspicious_updates_one_row() {
        let store = InMemoryHistoryStore::new();
        store.insert_user(User::new(10, "Mary", "mary@example.com", "+254712345678"));
        store.insert_user(User::new(11, "John", "john@example.com", "+254787654321"));

        store.set_user_suspicious(10, true).unwrap();

        assert!(store.user(10).unwrap().is_suspicious);
        assert!(!store.user(11).unwrap().is_suspicious);
    }

    #[test]
    fn test_set_user_suspicious_is_idempotent() {
        let store = InMemoryHistoryStore::new();
        store.insert_user(User::new(10, "Mary", "mary@example.com", "+254712345678"));

        store.set_user_suspicious(10, true).unwrap();
        store.set_user_suspicious(10, true).unwrap();
        assert!(store.user(10).unwrap().is_suspicious);
    }

    #[test]
    fn test_set_user_suspicious_missing_user_is_noop() {
        let store = InMemoryHistoryStore::new();
        assert!(store.set_user_suspicious(999, true).is_ok());
    }
}
