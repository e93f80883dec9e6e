use crate::election::LeaderSelection;
use ledger::ParticipantKey;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
pub mod cache_tests;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    pub task_id: String,
    pub round: i64,
    pub leader_set_size: usize,
    pub caller: ParticipantKey,
}

/// Leader selections memoized for `ttl`. Expiry is checked against the
/// instant supplied by the caller.
pub struct SelectionCache {
    ttl: Duration,
    entries: Mutex<HashMap<SelectionKey, (Instant, LeaderSelection)>>,
}

impl SelectionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &SelectionKey, now: Instant) -> Option<LeaderSelection> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((stored, selection)) = entries.get(key) {
            if now.saturating_duration_since(*stored) < self.ttl {
                return Some(selection.clone());
            }
            entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: SelectionKey, selection: LeaderSelection, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, (now, selection));
    }

    /// Drops every expired entry.
    pub fn purge(&self, now: Instant) {
        let ttl = self.ttl;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, (stored, _)| now.saturating_duration_since(*stored) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
