//! manga-rs: a lightweight gRPC server for a single manga volume.
//!
//! This crate serves the metadata and page images of one manga volume
//! over two unary RPCs, `GetMangaInfo` and `GetMangaImage`.
//!
//! # Features
//!
//! - Directory and CBZ archive volume backings
//! - Random access to any page without scanning prior pages
//! - Bounded LRU caching of hot pages
//! - 0-based page numbering validated against the volume's page count
//! - Graceful shutdown on ctrl-c
//!
//! Pages are served verbatim as already-encoded image bytes; there is no
//! transcoding, resizing, or upload path.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// LRU page cache.
pub mod cache;
/// Configuration and CLI.
pub mod config;
/// Error types.
pub mod error;
/// gRPC service.
pub mod server;
/// Image serving and metadata assembly.
pub mod service;
/// Volume storage backends.
pub mod store;
/// Volume metadata model.
pub mod volume;


pub use cache::PageCache;
pub use config::{Cli, Command, Config};
pub use error::{AppError, Result};
pub use server::MangaService;
pub use service::{ImageService, MetadataProvider};
pub use store::VolumeStore;
