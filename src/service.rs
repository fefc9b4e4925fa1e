//! Image serving and metadata assembly on top of a volume store.

use crate::cache::PageCache;
use crate::error::{AppError, Result};
use crate::store::VolumeStore;
use crate::volume::VolumeInfo;
use std::sync::Arc;

/// Serves page images, consulting the cache before the volume store.
///
/// Page numbering is 0-based: valid requests satisfy `number < pages`,
/// where `pages` is the count reported in the volume metadata. Anything
/// else fails with [`AppError::OutOfRange`] before the cache or store is
/// touched.
#[derive(Clone)]
pub struct ImageService {
    store: Arc<dyn VolumeStore>,
    cache: PageCache,
}

impl ImageService {
    /// Create a service for one volume with the given page cache.
    pub fn new(store: Arc<dyn VolumeStore>, cache: PageCache) -> Self {
        Self { store, cache }
    }

    /// Get the raw image bytes for one page.
    ///
    /// Cache misses read the store on a blocking task; the cache is
    /// populated inside that task, so the bytes are kept even when the
    /// requesting caller has gone away before the read finishes.
    pub async fn get_image(&self, number: u32) -> Result<Arc<Vec<u8>>> {
        let pages = self.store.page_count();
        if number >= pages {
            return Err(AppError::OutOfRange { number, pages });
        }

        if let Some(bytes) = self.cache.get(number) {
            tracing::debug!(page = number, size = bytes.len(), "Cache hit");
            return Ok(bytes);
        }

        let store = Arc::clone(&self.store);
        let cache = self.cache.clone();

        let bytes = tokio::task::spawn_blocking(move || {
            let bytes = store.load_page(number)?;
            Ok::<_, AppError>(cache.insert(number, bytes))
        })
        .await
        .map_err(|e| AppError::Internal(format!("page read task failed: {e}")))??;

        tracing::debug!(page = number, size = bytes.len(), "Cache miss, loaded from store");
        Ok(bytes)
    }
}

/// Assembles the full metadata response, cover included.
///
/// Metadata calls are rare next to image calls, so the composed result is
/// rebuilt from the store on every request rather than cached.
#[derive(Clone)]
pub struct MetadataProvider {
    store: Arc<dyn VolumeStore>,
}

impl MetadataProvider {
    /// Create a provider for one volume.
    pub fn new(store: Arc<dyn VolumeStore>) -> Self {
        Self { store }
    }

    /// Get the volume metadata record together with the cover bytes.
    pub async fn get_info(&self) -> Result<VolumeInfo> {
        let store = Arc::clone(&self.store);

        let cover = tokio::task::spawn_blocking(move || store.load_cover())
            .await
            .map_err(|e| AppError::Internal(format!("cover read task failed: {e}")))??;

        Ok(VolumeInfo {
            meta: self.store.metadata().clone(),
            cover,
        })
    }
}
