//! gRPC front end: the `Manga` service over tonic.

use crate::cache::PageCache;
use crate::service::{ImageService, MetadataProvider};
use crate::store::VolumeStore;
use std::sync::Arc;
use tonic::{Request, Response, Status};

#[allow(missing_docs)]
pub mod proto {
    //! Generated protobuf types for the `manga` package.
    tonic::include_proto!("manga");
}

use proto::manga_server::{Manga, MangaServer};
use proto::{Empty, Image, ImageNumber, MangaInfo};

/// gRPC service backed by one volume.
pub struct MangaService {
    metadata: MetadataProvider,
    images: ImageService,
}

impl MangaService {
    /// Build the service from an opened store and its page cache.
    pub fn new(store: Arc<dyn VolumeStore>, cache: PageCache) -> Self {
        Self {
            metadata: MetadataProvider::new(Arc::clone(&store)),
            images: ImageService::new(store, cache),
        }
    }

    /// Wrap the service for registration with a tonic server.
    pub fn into_server(self) -> MangaServer<Self> {
        MangaServer::new(self)
    }
}

#[tonic::async_trait]
impl Manga for MangaService {
    async fn get_manga_info(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<MangaInfo>, Status> {
        let info = self.metadata.get_info().await?;

        tracing::info!(id = info.meta.id, pages = info.meta.pages, "Served volume info");

        Ok(Response::new(MangaInfo {
            id: info.meta.id,
            english_name: info.meta.english_name,
            japanese_name: info.meta.japanese_name,
            cover: info.cover,
            tags: info.meta.tags,
            artists: info.meta.artists,
            pages: info.meta.pages,
            uploaded: info.meta.uploaded,
        }))
    }

    async fn get_manga_image(
        &self,
        request: Request<ImageNumber>,
    ) -> Result<Response<Image>, Status> {
        let number = request.into_inner().number;
        let bytes = self.images.get_image(number).await?;

        tracing::info!(page = number, size = bytes.len(), "Served page image");

        Ok(Response::new(Image {
            image: bytes.as_ref().clone(),
        }))
    }
}
