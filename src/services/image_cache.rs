//! Downloaded image cache with LRU eviction.
//!
//! Keeps the raw bytes of recently fetched images so repeated requests
//! for the same URL skip the network. Entries expire after a fixed TTL.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Cached download
struct CachedImage {
    bytes: Arc<[u8]>,
    cached_at: Instant,
}

impl CachedImage {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

struct CacheState {
    entries: HashMap<String, CachedImage>,
    /// Keys by last use (oldest first)
    usage_order: Vec<String>,
}

/// Thread-safe LRU cache of image bytes keyed by URL hash.
pub struct ImageCache {
    state: Mutex<CacheState>,
    max_entries: usize,
    ttl: Duration,
}

impl ImageCache {
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                usage_order: Vec::new(),
            }),
            max_entries,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A panic while holding the lock cannot leave the map half-updated
        // in a way that matters for a cache; keep serving.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get cached bytes for `url` if present and fresh
    pub fn get(&self, url: &str) -> Option<Arc<[u8]>> {
        let key = cache_key(url);
        let mut state = self.lock();

        let entry = state.entries.get(&key)?;
        if entry.is_expired(self.ttl) {
            state.entries.remove(&key);
            state.usage_order.retain(|k| k != &key);
            tracing::debug!(url = %url, "Image cache: entry expired");
            return None;
        }
        let bytes = entry.bytes.clone();

        state.usage_order.retain(|k| k != &key);
        state.usage_order.push(key);

        tracing::debug!(url = %url, "Image cache hit");
        Some(bytes)
    }

    /// Store downloaded bytes for `url`
    pub fn store(&self, url: &str, bytes: Arc<[u8]>) {
        if self.max_entries == 0 {
            return;
        }
        let key = cache_key(url);
        let mut state = self.lock();

        if state.entries.contains_key(&key) {
            state.usage_order.retain(|k| k != &key);
        }

        while state.entries.len() >= self.max_entries && !state.usage_order.is_empty() {
            let oldest = state.usage_order.remove(0);
            state.entries.remove(&oldest);
            tracing::debug!(
                key = %oldest,
                cache_size = state.entries.len(),
                "Image cache: evicted oldest entry"
            );
        }

        state.entries.insert(
            key.clone(),
            CachedImage {
                bytes,
                cached_at: Instant::now(),
            },
        );
        state.usage_order.push(key);
    }

    /// Number of cached entries (expired ones included until touched)
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First 16 bytes of the URL's SHA-256, hex encoded.
pub fn cache_key(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    hex::encode(&digest[..16])
}
