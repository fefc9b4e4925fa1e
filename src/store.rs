mod cbz;
mod dir;

pub use cbz::CbzStore;
pub use dir::DirStore;

use crate::config::VolumeFormat;
use crate::error::{AppError, Result};
use crate::volume::VolumeMeta;
use std::path::Path;

/// Filename of the metadata record inside a volume.
pub const METADATA_FILE: &str = "manga.json";

/// Read-only access to one volume's backing medium.
///
/// Stores load the metadata record eagerly at open and verify that its
/// `pages` count matches the number of page entries actually present, so
/// every index in `[0, pages)` is expected to be loadable. Page bytes are
/// read lazily, one whole page per call, with random access by index.
pub trait VolumeStore: Send + Sync {
    /// The volume metadata record (without bulk page bytes).
    fn metadata(&self) -> &VolumeMeta;

    /// Read the cover image bytes.
    ///
    /// The cover is distinct from the page sequence even when its bytes
    /// come from the same source file as page 0.
    fn load_cover(&self) -> Result<Vec<u8>>;

    /// Read one page image by its 0-based index.
    fn load_page(&self, index: u32) -> Result<Vec<u8>>;

    /// Total page count.
    fn page_count(&self) -> u32 {
        self.metadata().pages
    }
}

/// Open the appropriate store for a volume path.
///
/// Directories use the flat `manga.json` + `cover.*` + `images/` layout;
/// `.cbz`/`.zip` files are opened as archives.
pub fn open_volume(path: &Path) -> Result<Box<dyn VolumeStore>> {
    match VolumeFormat::detect(path) {
        Some(VolumeFormat::Dir) => Ok(Box::new(DirStore::open(path)?)),
        Some(VolumeFormat::Cbz) => Ok(Box::new(CbzStore::open(path)?)),
        None => Err(AppError::InvalidFormat(format!(
            "unsupported volume path: {}",
            path.display()
        ))),
    }
}

/// Check if a filename is an image.
pub(crate) fn is_image_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".jpg")
        || lower.ends_with(".jpeg")
        || lower.ends_with(".png")
        || lower.ends_with(".gif")
        || lower.ends_with(".webp")
        || lower.ends_with(".jxl")
}

/// Check if a path's file stem names the cover image.
pub(crate) fn is_cover_name(name: &str) -> bool {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("cover"))
}
