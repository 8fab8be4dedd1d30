//! Map whose entries lapse after a period without use.
//!
//! Reads and writes both refresh an entry. Expired entries are dropped when
//! read and swept on every insert, so the map never holds more than what was
//! touched within one idle window.

use chrono::Duration;
use std::collections::HashMap;
use std::hash::Hash;

use crate::domain::foundation::Timestamp;

/// Idle window applied when none is configured.
pub const DEFAULT_IDLE_TTL_SECS: i64 = 30 * 60;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    touched_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct ExpiringMap<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> ExpiringMap<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.get_at(key, Timestamp::now())
    }

    /// Returns a live entry and refreshes it; an expired one is removed.
    pub fn get_at(&mut self, key: &K, now: Timestamp) -> Option<&V> {
        let expired = self.entries.get(key)?.touched_at.is_older_than(self.ttl, &now);
        if expired {
            self.entries.remove(key);
            return None;
        }
        let entry = self.entries.get_mut(key)?;
        entry.touched_at = now;
        Some(&entry.value)
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Timestamp::now());
    }

    pub fn insert_at(&mut self, key: K, value: V, now: Timestamp) {
        self.purge_expired(now);
        self.entries.insert(
            key,
            Entry {
                value,
                touched_at: now,
            },
        );
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Drops every entry idle for longer than the window.
    fn purge_expired(&mut self, now: Timestamp) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| !entry.touched_at.is_older_than(ttl, &now));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for ExpiringMap<K, V> {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_IDLE_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> ExpiringMap<&'static str, u32> {
        ExpiringMap::new(Duration::seconds(60))
    }

    #[test]
    fn entry_is_live_within_window() {
        let start = Timestamp::now();
        let mut map = map();
        map.insert_at("a", 1, start);

        assert_eq!(map.get_at(&"a", start.plus_secs(60)), Some(&1));
    }

    #[test]
    fn idle_entry_is_dropped_on_read() {
        let start = Timestamp::now();
        let mut map = map();
        map.insert_at("a", 1, start);

        assert_eq!(map.get_at(&"a", start.plus_secs(61)), None);
        assert!(map.is_empty());
    }

    #[test]
    fn reading_refreshes_the_window() {
        let start = Timestamp::now();
        let mut map = map();
        map.insert_at("a", 1, start);

        assert!(map.get_at(&"a", start.plus_secs(50)).is_some());
        assert_eq!(map.get_at(&"a", start.plus_secs(100)), Some(&1));
    }

    #[test]
    fn insert_sweeps_stale_entries() {
        let start = Timestamp::now();
        let mut map = map();
        for key in ["a", "b", "c"] {
            map.insert_at(key, 1, start);
        }
        map.insert_at("d", 2, start.plus_secs(30));

        map.insert_at("e", 3, start.plus_secs(61));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get_at(&"d", start.plus_secs(62)), Some(&2));
    }

    #[test]
    fn remove_returns_value() {
        let mut map = map();
        map.insert("a", 7);
        assert_eq!(map.remove(&"a"), Some(7));
        assert_eq!(map.remove(&"a"), None);
    }
}
