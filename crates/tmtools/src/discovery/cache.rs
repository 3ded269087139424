use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Most entries this cache will hold before the oldest one is evicted.
const MAX_ENTRIES: usize = 64;

/// Bounded, time-boxed in-process cache for aggregated listings.
///
/// A full venue enumeration can take hundreds of requests under rate
/// limiting, so repeated calls with the same filters reuse the previous
/// aggregate until it expires. Entries are dropped on expiry and nothing is
/// persisted across runs.
pub struct AggregateCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, T)>>,
}

impl<T: Clone> AggregateCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, Instant::now())
    }

    pub fn put(&self, key: String, value: T) {
        self.put_at(key, value, Instant::now());
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<T> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some((stored, value)) if now.duration_since(*stored) < self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put_at(&self, key: String, value: T, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= MAX_ENTRIES && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, (stored, _))| *stored)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }
        entries.insert(key, (now, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl_miss_after_expiry() {
        let cache = AggregateCache::new(Duration::from_secs(300));
        let start = Instant::now();

        cache.put_at("oslo|NO".to_string(), 7usize, start);
        assert_eq!(cache.get_at("oslo|NO", start + Duration::from_secs(299)), Some(7));
        assert_eq!(cache.get_at("oslo|NO", start + Duration::from_secs(300)), None);
        // The expired entry was discarded, not resurrected.
        assert_eq!(cache.get_at("oslo|NO", start + Duration::from_secs(1)), None);
    }

    #[test]
    fn unknown_key_is_a_miss() {
        let cache: AggregateCache<usize> = AggregateCache::new(Duration::from_secs(10));
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn capacity_evicts_the_oldest_entry() {
        let cache = AggregateCache::new(Duration::from_secs(3600));
        let start = Instant::now();

        for i in 0..MAX_ENTRIES {
            cache.put_at(format!("k{i}"), i, start + Duration::from_secs(i as u64));
        }
        cache.put_at("overflow".to_string(), 999, start + Duration::from_secs(1000));

        assert_eq!(cache.get_at("k0", start + Duration::from_secs(1000)), None);
        assert_eq!(
            cache.get_at("overflow", start + Duration::from_secs(1000)),
            Some(999)
        );
        assert_eq!(cache.get_at("k1", start + Duration::from_secs(1000)), Some(1));
    }
}
