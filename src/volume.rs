//! Volume metadata model.

use serde::{Deserialize, Serialize};

/// Metadata for the single manga volume served by this instance.
///
/// Deserialized from the volume's `manga.json` record. All fields are
/// immutable after load; `uploaded` is an opaque pass-through string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeMeta {
    /// Numeric identifier, assigned when the volume was authored.
    pub id: u32,

    /// English display title.
    pub english_name: String,

    /// Japanese display title.
    pub japanese_name: String,

    /// Genre tags, in authored order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Artists, in authored order.
    #[serde(default)]
    pub artists: Vec<String>,

    /// Total page count. Must equal the number of page entries in the
    /// backing store; stores verify this at open.
    pub pages: u32,

    /// Upload date string, not parsed or validated.
    pub uploaded: String,
}

/// Full metadata response: the volume record plus its cover image bytes.
#[derive(Debug, Clone)]
pub struct VolumeInfo {
    /// The volume metadata record.
    pub meta: VolumeMeta,
    /// Raw encoded cover image.
    pub cover: Vec<u8>,
}
