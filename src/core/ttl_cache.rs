//! Time-to-live memoization table.
//!
//! [`TtlCache`] stores values alongside the instant they were fetched. A read
//! is a hit only while `now - fetched_at < ttl`; afterwards the entry is
//! treated as absent and is replaced by the next successful fetch. There is no
//! background eviction, entries are only ever overwritten.
//!
//! Each key owns a slot with its own lock. The table lock is held only long
//! enough to find or create a slot, so [`TtlCache::get_or_try_fetch`] blocks
//! callers of the same key while a fetch is in flight and leaves every other
//! key alone.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default lifetime of a cached remote response
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

type Slot<V> = Arc<Mutex<Option<CacheEntry<V>>>>;

pub struct TtlCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Live value for `key`, or `None` on a miss or an expired entry
    pub fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.lock().get(key).cloned()?;
        let entry = slot.lock();
        self.live_value(&entry)
    }

    /// Store `value` as fetched now, replacing any previous entry
    pub fn put(&self, key: K, value: V) {
        let slot = self.slot(key);
        let fetched_at = self.clock.now();
        *slot.lock() = Some(CacheEntry { value, fetched_at });
    }

    /// Return the live value for `key`, or run `fetch` and cache its success.
    /// A failed fetch caches nothing, so the next read retries.
    pub fn get_or_try_fetch<E, F>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let slot = self.slot(key);
        let mut entry = slot.lock();
        if let Some(value) = self.live_value(&entry) {
            return Ok(value);
        }

        let value = fetch()?;
        *entry = Some(CacheEntry {
            value: value.clone(),
            fetched_at: self.clock.now(),
        });
        Ok(value)
    }

    /// Number of stored entries, live or expired
    pub fn len(&self) -> usize {
        let slots: Vec<Slot<V>> = self.slots.lock().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot for `key`, created empty on first use. The table lock is released
    /// before the caller locks the slot.
    fn slot(&self, key: K) -> Slot<V> {
        self.slots.lock().entry(key).or_default().clone()
    }

    fn live_value(&self, entry: &Option<CacheEntry<V>>) -> Option<V> {
        let now = self.clock.now();
        entry
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.fetched_at) < self.ttl)
            .map(|e| e.value.clone())
    }
}

/// Manually advanced clock for expiry tests
#[cfg(test)]
#[derive(Clone)]
pub(crate) struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}
