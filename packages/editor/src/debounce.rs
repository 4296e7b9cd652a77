//! # Debounced Writes
//!
//! Per-key trailing debounce table. Scheduling a key that already has a
//! pending write replaces its value and pushes its deadline out; keys never
//! affect one another. The table holds no timers of its own: the owner asks
//! for whatever is due at a given instant.

use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub key: String,
    pub value: String,

    /// Epoch millis at which the write becomes due
    pub due_at: i64,

    seq: u64,
}

#[derive(Debug, Default)]
pub struct Debouncer {
    pending: HashMap<String, PendingWrite>,
    seq: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `value` for `key`, cancelling any earlier pending write for
    /// the same key. Returns true if a pending write was replaced.
    pub fn schedule(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        now_millis: i64,
        window: Duration,
    ) -> bool {
        let key = key.into();
        let window = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);
        self.seq += 1;

        let write = PendingWrite {
            key: key.clone(),
            value: value.into(),
            due_at: now_millis.saturating_add(window),
            seq: self.seq,
        };

        self.pending.insert(key, write).is_some()
    }

    pub fn cancel(&mut self, key: &str) -> Option<PendingWrite> {
        self.pending.remove(key)
    }

    /// Remove and return every write due at `now_millis`, oldest deadline
    /// first (ties in scheduling order)
    pub fn take_due(&mut self, now_millis: i64) -> Vec<PendingWrite> {
        let due_keys: Vec<String> = self
            .pending
            .values()
            .filter(|w| w.due_at <= now_millis)
            .map(|w| w.key.clone())
            .collect();

        let mut due: Vec<PendingWrite> = due_keys
            .iter()
            .filter_map(|key| self.pending.remove(key))
            .collect();
        due.sort_by_key(|w| (w.due_at, w.seq));
        due
    }

    /// Remove and return every pending write regardless of deadline
    pub fn take_all(&mut self) -> Vec<PendingWrite> {
        let mut all: Vec<PendingWrite> = self.pending.drain().map(|(_, w)| w).collect();
        all.sort_by_key(|w| (w.due_at, w.seq));
        all
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }

    pub fn pending_value(&self, key: &str) -> Option<&str> {
        self.pending.get(key).map(|w| w.value.as_str())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<i64> {
        self.pending.values().map(|w| w.due_at).min()
    }
}
