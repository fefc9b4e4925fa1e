//! CBZ (Comic Book ZIP) volume store.
//!
//! Page order is the natural sort of the archive's image entry names (so
//! `page2` comes before `page10`). Metadata comes from an embedded
//! `manga.json` entry. The cover is a `cover.*` entry when present,
//! otherwise the first page image. Reads go through the ZIP central
//! directory, so any page is one seek away.

use crate::error::{AppError, Result};
use crate::store::{self, VolumeStore};
use crate::volume::VolumeMeta;
use parking_lot::Mutex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Store backed by a CBZ/ZIP archive.
pub struct CbzStore {
    meta: VolumeMeta,
    cover: String,
    pages: Vec<String>,
    // The ZIP reader seeks on a shared file handle, so reads take &mut.
    archive: Mutex<ZipArchive<File>>,
}

impl CbzStore {
    /// Open a CBZ archive, loading and validating its metadata.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        let meta: VolumeMeta = {
            let entry = archive.by_name(store::METADATA_FILE).map_err(|e| {
                AppError::InvalidFormat(format!("no {} in archive: {e}", store::METADATA_FILE))
            })?;
            serde_json::from_reader(entry)?
        };

        let mut images = image_entries(&archive);
        let cover = match images.iter().position(|name| store::is_cover_name(name)) {
            Some(position) => images.remove(position),
            None => images
                .first()
                .cloned()
                .ok_or_else(|| AppError::InvalidFormat("archive has no images".to_string()))?,
        };

        if images.len() as u32 != meta.pages {
            return Err(AppError::InvalidFormat(format!(
                "metadata declares {} pages but archive holds {} page images",
                meta.pages,
                images.len()
            )));
        }

        tracing::debug!(volume = %path.display(), pages = images.len(), "Opened CBZ volume");

        Ok(Self {
            meta,
            cover,
            pages: images,
            archive: Mutex::new(archive),
        })
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.lock();
        let mut entry = archive
            .by_name(name)
            .map_err(|e| AppError::NotFound(format!("{name}: {e}")))?;

        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        Ok(data)
    }
}

impl VolumeStore for CbzStore {
    fn metadata(&self) -> &VolumeMeta {
        &self.meta
    }

    fn load_cover(&self) -> Result<Vec<u8>> {
        self.read_entry(&self.cover)
    }

    fn load_page(&self, index: u32) -> Result<Vec<u8>> {
        let name = self
            .pages
            .get(index as usize)
            .ok_or_else(|| AppError::NotFound(format!("page {index} has no archive entry")))?;

        self.read_entry(name)
    }
}

/// Get the sorted list of image entries in the archive.
fn image_entries(archive: &ZipArchive<File>) -> Vec<String> {
    let mut images: Vec<String> = archive
        .file_names()
        .filter(|name| store::is_image_file(name))
        .filter(|name| !name.contains("__MACOSX")) // Skip macOS metadata
        .map(String::from)
        .collect();

    // Sort naturally (so page2 comes before page10)
    images.sort_by(|a, b| natord_compare(a, b));

    images
}

/// Natural string comparison for sorting.
fn natord_compare(a: &str, b: &str) -> std::cmp::Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek(), b_chars.peek()) {
            (None, None) => return std::cmp::Ordering::Equal,
            (None, Some(_)) => return std::cmp::Ordering::Less,
            (Some(_), None) => return std::cmp::Ordering::Greater,
            (Some(&ac), Some(&bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    // Compare numbers
                    let a_num: String = a_chars
                        .by_ref()
                        .take_while(|c| c.is_ascii_digit())
                        .collect();
                    let b_num: String = b_chars
                        .by_ref()
                        .take_while(|c| c.is_ascii_digit())
                        .collect();

                    let a_val: u64 = a_num.parse().unwrap_or(0);
                    let b_val: u64 = b_num.parse().unwrap_or(0);

                    match a_val.cmp(&b_val) {
                        std::cmp::Ordering::Equal => continue,
                        other => return other,
                    }
                } else {
                    a_chars.next();
                    b_chars.next();

                    match ac.to_lowercase().cmp(bc.to_lowercase()) {
                        std::cmp::Ordering::Equal => continue,
                        other => return other,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natord_compare() {
        assert_eq!(natord_compare("page1", "page2"), std::cmp::Ordering::Less);
        assert_eq!(natord_compare("page2", "page10"), std::cmp::Ordering::Less);
        assert_eq!(
            natord_compare("page10", "page2"),
            std::cmp::Ordering::Greater
        );
    }

    #[test]
    fn test_cover_name_detection() {
        assert!(store::is_cover_name("cover.jpg"));
        assert!(store::is_cover_name("Cover.PNG"));
        assert!(!store::is_cover_name("001.jpg"));
        assert!(!store::is_cover_name("cover_art.jpg"));
    }
}
