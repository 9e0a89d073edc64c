//! Caller-owned cache of organization-name existence lookups.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy)]
struct Entry {
    exists: bool,
    stored_at: Instant,
}

/// Name to "already exists" answers, keyed case-insensitively.
///
/// Oldest entries are evicted first once `capacity` is reached and entries
/// older than `ttl` are treated as absent.
#[derive(Debug, Clone)]
pub struct LookupCache {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, Entry>,
    order: VecDeque<String>,
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }
}

impl LookupCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.get_at(name, Instant::now())
    }

    fn get_at(&self, name: &str, now: Instant) -> Option<bool> {
        self.entries
            .get(&Self::key(name))
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.exists)
    }

    pub fn insert(&mut self, name: &str, exists: bool) {
        self.insert_at(name, exists, Instant::now());
    }

    fn insert_at(&mut self, name: &str, exists: bool, now: Instant) {
        let key = Self::key(name);
        let entry = Entry {
            exists,
            stored_at: now,
        };
        if self.entries.insert(key.clone(), entry).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut cache = LookupCache::default();
        cache.insert("Acme Foods", true);
        assert_eq!(cache.get(" ACME foods"), Some(true));
        assert_eq!(cache.get("Beta"), None);
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut cache = LookupCache::new(2, DEFAULT_CACHE_TTL);
        cache.insert("a", false);
        cache.insert("b", true);
        cache.insert("A", true);
        cache.insert("c", false);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(true));
        assert_eq!(cache.get("c"), Some(false));
    }

    #[test]
    fn entries_expire() {
        let mut cache = LookupCache::new(8, Duration::from_secs(10));
        let start = Instant::now();
        cache.insert_at("acme", true, start);
        assert_eq!(cache.get_at("acme", start + Duration::from_secs(9)), Some(true));
        assert_eq!(cache.get_at("acme", start + Duration::from_secs(10)), None);
    }
}
