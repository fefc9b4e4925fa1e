//! In-memory LRU cache for decoded page bytes.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Bounded least-recently-used cache of page image bytes, keyed by page
/// index.
///
/// Entries are a disposable projection of the volume store's data: nothing
/// outside the cache holds references into it, so eviction is pure internal
/// bookkeeping. Eviction happens synchronously inside [`PageCache::insert`]
/// once the configured capacity (in pages) is exceeded, and recency is
/// updated on both hits and inserts. The cover image is never stored here.
///
/// Cloning is cheap and shares the underlying cache.
#[derive(Clone)]
pub struct PageCache {
    // Map plus recency order is the only shared mutable state in the
    // service; a single lock keeps both consistent.
    inner: Arc<Mutex<LruCache<u32, Arc<Vec<u8>>>>>,
}

impl PageCache {
    /// Create a cache holding at most `capacity` pages (minimum one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Look up a page, marking it most recently used on a hit.
    ///
    /// A miss is not an error; the caller falls back to the volume store.
    pub fn get(&self, index: u32) -> Option<Arc<Vec<u8>>> {
        self.inner.lock().get(&index).cloned()
    }

    /// Insert a page, evicting the least recently used entry if full.
    ///
    /// Returns the shared handle to the stored bytes.
    pub fn insert(&self, index: u32, bytes: Vec<u8>) -> Arc<Vec<u8>> {
        let bytes = Arc::new(bytes);
        self.inner.lock().put(index, Arc::clone(&bytes));
        bytes
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum number of cached pages.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }
}
