/*!
 * Shared TTL cache for upstream lookups.
 *
 * One instance is built at startup and handed to every fetcher. Entries
 * expire lazily on read once older than the TTL; the number of entries is
 * bounded with least-recently-used eviction. A periodic sweep can be started
 * to drop expired entries that are never read again.
 */

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::study::commentary::CommentaryEntry;
use crate::study::verses::VerseResult;

/// One hour, the lifetime of an upstream answer
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Upper bound on cached entries
pub const DEFAULT_CAPACITY: usize = 1000;

/// Build a composite cache key such as `verse:John 3:16:kjv`
pub fn cache_key(kind: &str, reference: &str, variant: Option<&str>) -> String {
    match variant {
        Some(variant) => format!("{}:{}:{}", kind, reference, variant),
        None => format!("{}:{}", kind, reference),
    }
}

/// Values the study fetchers put in the shared cache
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Verse(VerseResult),
    Commentary(CommentaryEntry),
}

/// The cache type shared by all study fetchers
pub type StudyCache = TtlCache<CachedValue>;

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Counters describing cache behaviour since creation or the last clear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Entries dropped to respect the capacity bound
    pub evictions: usize,
    /// Entries dropped because they outlived the TTL
    pub expirations: usize,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Keyed store with time-based expiry and an LRU capacity bound
///
/// Cloning yields another handle onto the same storage.
pub struct TtlCache<V> {
    entries: Arc<Mutex<LruCache<String, CacheEntry<V>>>>,
    ttl: Duration,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
    evictions: Arc<AtomicUsize>,
    expirations: Arc<AtomicUsize>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache; a zero capacity is raised to one entry
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            ttl,
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            evictions: Arc::new(AtomicUsize::new(0)),
            expirations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fetch a live entry; expired entries are dropped and reported absent
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for '{}'", key);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
            self.expirations.fetch_add(1, Ordering::Relaxed);
            debug!("Cache entry for '{}' expired", key);
        } else {
            debug!("Cache miss for '{}'", key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a value, evicting the least recently used entry when full
    pub fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let entry = CacheEntry { value, stored_at: Instant::now() };

        let mut entries = self.entries.lock();
        if let Some((evicted_key, _)) = entries.push(key.clone(), entry) {
            if evicted_key != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                debug!("Evicted '{}' to store '{}'", evicted_key, key);
            }
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock();
        let stale: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.stored_at.elapsed() > self.ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            entries.pop(key);
        }
        self.expirations.fetch_add(stale.len(), Ordering::Relaxed);
        stale.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of entries held at once
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Remove all entries and reset the counters
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.expirations.store(0, Ordering::Relaxed);
        debug!("Cache cleared");
    }
}

impl<V: Clone + Send + 'static> TtlCache<V> {
    /// Start a background task purging expired entries every `every`
    ///
    /// Must be called from within a tokio runtime. Abort the handle to stop it.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!("Cache sweep removed {} expired entries", purged);
                }
            }
        })
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
            hits: Arc::clone(&self.hits),
            misses: Arc::clone(&self.misses),
            evictions: Arc::clone(&self.evictions),
            expirations: Arc::clone(&self.expirations),
        }
    }
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}
