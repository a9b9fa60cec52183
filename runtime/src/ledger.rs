//! # Published Ledger ADTs
//!
//! The typed view a contract gets of its published (on-ledger) state. Two
//! shapes cover everything the VEIL contracts need:
//!
//! - [`Counter`] — an unsigned counter cell supporting increment-by-delta.
//! - [`LedgerMap`] — an insert-or-overwrite map with membership, lookup,
//!   size, and ordered iteration.
//!
//! Both are plain in-memory values. On the real platform the same surface
//! is backed by a key-path query transcript against the shared state tree;
//! keeping the API identical is what lets a proving integration wrap these
//! contracts at the boundary without touching their logic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An unsigned counter cell.
///
/// Monotonically non-decreasing: increments saturate at `u64::MAX` instead
/// of wrapping, so the value can never go backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counter(u64);

impl Counter {
    /// A counter starting at zero.
    pub const fn new() -> Self {
        Counter(0)
    }

    /// Current value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Adds `delta` to the counter, saturating at `u64::MAX`.
    pub fn increment(&mut self, delta: u64) {
        self.0 = self.0.saturating_add(delta);
    }
}

/// An insert-or-overwrite map keyed by an ordered key type.
///
/// Entries are created by [`insert`](Self::insert) and never removed; a
/// second insert under the same key silently replaces the value. Iteration
/// is in key order, so serialized dumps are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerMap<K: Ord, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> LedgerMap<K, V> {
    /// An empty map.
    pub fn new() -> Self {
        LedgerMap {
            entries: BTreeMap::new(),
        }
    }

    /// True when no entry has ever been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn size(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Whether `key` has an entry.
    pub fn member(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// The value stored under `key`, if any. A missing key is `None`, not
    /// a default — callers decide whether absence is an error.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Inserts `value` under `key`, overwriting any existing entry.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }
}

impl<K: Ord, V> Default for LedgerMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bytes32;

    #[test]
    fn counter_increments_by_delta() {
        let mut c = Counter::new();
        c.increment(1);
        c.increment(1);
        c.increment(5);
        assert_eq!(c.value(), 7);
    }

    #[test]
    fn counter_saturates_instead_of_wrapping() {
        let mut c = Counter::new();
        c.increment(u64::MAX);
        c.increment(1);
        assert_eq!(c.value(), u64::MAX);
    }

    #[test]
    fn map_insert_overwrites_silently() {
        let mut m = LedgerMap::new();
        let k = Bytes32::from_u64(1);
        m.insert(k, Bytes32::from_u64(10));
        m.insert(k, Bytes32::from_u64(20));
        assert_eq!(m.size(), 1);
        assert_eq!(m.lookup(&k), Some(&Bytes32::from_u64(20)));
    }

    #[test]
    fn membership_and_lookup_agree() {
        let mut m = LedgerMap::new();
        let present = Bytes32::from_u64(1);
        let absent = Bytes32::from_u64(2);
        m.insert(present, Bytes32::from_u64(3));
        assert!(m.member(&present));
        assert!(!m.member(&absent));
        assert!(m.lookup(&absent).is_none());
    }

    #[test]
    fn iteration_is_key_ordered() {
        let mut m = LedgerMap::new();
        for n in [3u64, 1, 2] {
            m.insert(Bytes32::from_u64(n), Bytes32::from_u64(n * 10));
        }
        let keys: Vec<_> = m.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                Bytes32::from_u64(1),
                Bytes32::from_u64(2),
                Bytes32::from_u64(3)
            ]
        );
    }
}
