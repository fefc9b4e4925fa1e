//! Directory-backed volume store.
//!
//! Layout: `manga.json` metadata record and a `cover.*` image at the root,
//! page images under `images/` named by their 0-based index (`0.jpg`,
//! `1.png`, ...). The index-to-path map is built once at open, so a page
//! read is a single file read regardless of which index is requested.

use crate::error::{AppError, Result};
use crate::store::{self, VolumeStore};
use crate::volume::VolumeMeta;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Store backed by a flat directory of page files.
pub struct DirStore {
    meta: VolumeMeta,
    cover: PathBuf,
    pages: Vec<PathBuf>,
}

impl DirStore {
    /// Open a volume directory, loading and validating its metadata.
    pub fn open(root: &Path) -> Result<Self> {
        let meta_file = File::open(root.join(store::METADATA_FILE)).map_err(|e| {
            AppError::InvalidFormat(format!("{}: {e}", root.join(store::METADATA_FILE).display()))
        })?;
        let meta: VolumeMeta = serde_json::from_reader(meta_file)?;

        let cover = find_cover(root)?;
        let pages = index_pages(&root.join("images"))?;

        if pages.len() as u32 != meta.pages {
            return Err(AppError::InvalidFormat(format!(
                "metadata declares {} pages but {} page files found",
                meta.pages,
                pages.len()
            )));
        }

        tracing::debug!(
            volume = %root.display(),
            pages = pages.len(),
            "Opened directory volume"
        );

        Ok(Self { meta, cover, pages })
    }
}

impl VolumeStore for DirStore {
    fn metadata(&self) -> &VolumeMeta {
        &self.meta
    }

    fn load_cover(&self) -> Result<Vec<u8>> {
        read_image(&self.cover)
    }

    fn load_page(&self, index: u32) -> Result<Vec<u8>> {
        let path = self
            .pages
            .get(index as usize)
            .ok_or_else(|| AppError::NotFound(format!("page {index} has no backing file")))?;

        read_image(path)
    }
}

/// Read a whole image file, mapping a vanished file to `NotFound`.
fn read_image(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AppError::NotFound(path.display().to_string())
        } else {
            AppError::Io(e)
        }
    })
}

/// Find the cover image at the volume root.
fn find_cover(root: &Path) -> Result<PathBuf> {
    let entry = walkdir::WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .find(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| store::is_image_file(n) && store::is_cover_name(n))
        });

    entry
        .map(|e| e.path().to_path_buf())
        .ok_or_else(|| AppError::InvalidFormat(format!("no cover image in {}", root.display())))
}

/// Build the dense index-to-path map from the `images/` directory.
///
/// Every file must be named `{index}.{ext}` with indices covering
/// `[0, count)` without gaps or duplicates.
fn index_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut indexed: Vec<(u32, PathBuf)> = walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(store::is_image_file)
        })
        .filter_map(|e| {
            let index: u32 = e.path().file_stem()?.to_str()?.parse().ok()?;
            Some((index, e.path().to_path_buf()))
        })
        .collect();

    indexed.sort_by_key(|(index, _)| *index);

    for (position, (index, path)) in indexed.iter().enumerate() {
        if *index != position as u32 {
            return Err(AppError::InvalidFormat(format!(
                "page indices are not dense: expected {position}, found {index} ({})",
                path.display()
            )));
        }
    }

    Ok(indexed.into_iter().map(|(_, path)| path).collect())
}
