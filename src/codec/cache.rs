//! Bounded, thread-safe cache of already-decoded headers.

use crate::header::Header;
use alloy_primitives::B256;
use lru::LruCache;
use std::{num::NonZeroUsize, sync::Mutex};

/// Default number of decoded headers kept in memory.
const DEFAULT_CAPACITY: usize = 128;

/// Memoizes header decoding across repeated lookups by hash.
///
/// Lookups are brief (an RLP decode plus a hash), so a single [`Mutex`] around
/// the cache is sufficient; there is no need for a reader/writer split here.
#[derive(Debug)]
pub struct HeaderCodecCache {
    inner: Mutex<LruCache<B256, Header>>,
}

impl HeaderCodecCache {
    /// Creates a cache with the default capacity of 128 headers.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a cache bounded to `capacity` headers.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap());
        Self { inner: Mutex::new(LruCache::new(capacity)) }
    }

    /// Returns the cached header for `hash` if present, decoding and caching
    /// `raw` otherwise.
    pub fn get_or_decode(&self, hash: B256, raw: &[u8]) -> Result<Header, alloy_rlp::Error> {
        let mut cache = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        if let Some(header) = cache.get(&hash) {
            return Ok(header.clone());
        }
        let header = Header::decode(raw)?;
        cache.put(hash, header.clone());
        Ok(header)
    }

    /// Inserts an already-constructed header into the cache, keyed by its hash.
    pub fn insert(&self, header: Header) {
        let hash = header.hash();
        let mut cache = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        cache.put(hash, header);
    }

    /// Removes a cached entry, e.g. when its header is displaced from the
    /// canonical chain and its byte representation may be evicted upstream.
    pub fn remove(&self, hash: &B256) {
        let mut cache = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        cache.pop(hash);
    }
}

impl Default for HeaderCodecCache {
    fn default() -> Self {
        Self::new()
    }
}
