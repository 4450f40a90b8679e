//! In-memory query counters.
//!
//! Counts live for the lifetime of the process only. The store is owned by the
//! dispatcher and shared through an `Arc`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Telegram user identifier.
pub type UserKey = u64;

#[derive(Debug, Default)]
struct Counters {
    per_user: HashMap<UserKey, u64>,
    total: u64,
}

/// Per-user and run-wide query counts.
#[derive(Debug, Default)]
pub struct QueryStats {
    inner: Mutex<Counters>,
}

impl QueryStats {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self) -> MutexGuard<'_, Counters> {
        // Counters stay consistent even if a holder panicked mid-update.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records one query for `user` and returns that user's new count.
    pub fn record(&self, user: UserKey) -> u64 {
        let mut counters = self.counters();
        counters.total += 1;
        let count = counters.per_user.entry(user).or_insert(0);
        *count += 1;
        *count
    }

    /// Number of queries recorded for `user`.
    pub fn user_count(&self, user: UserKey) -> u64 {
        self.counters().per_user.get(&user).copied().unwrap_or(0)
    }

    /// Number of queries recorded for all users.
    pub fn total(&self) -> u64 {
        self.counters().total
    }

    /// Number of distinct users seen.
    pub fn users(&self) -> usize {
        self.counters().per_user.len()
    }
}
