use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::media::dtos::{extension_for, MediaAssetDto, MediaInfoDto, UnitAssetsDto};
use crate::features::media::multipart::UploadedImage;
use crate::modules::storage::MediaStore;

/// Service for media operations.
///
/// Pure pass-through to the storage provider: nothing is persisted locally,
/// the returned metadata is the only record of an upload.
pub struct MediaService {
    store: Arc<MediaStore>,
}

impl MediaService {
    pub fn new(store: Arc<MediaStore>) -> Self {
        Self { store }
    }

    fn generate_key(prefix: &str, image: &UploadedImage) -> String {
        let extension = extension_for(&image.content_type)
            .unwrap_or_else(|| image.original_filename.rsplit('.').next().unwrap_or("bin"));
        format!("{}/{}.{}", prefix, Uuid::new_v4(), extension)
    }

    async fn store_image(&self, prefix: &str, image: UploadedImage) -> Result<MediaAssetDto> {
        let key = Self::generate_key(prefix, &image);
        let size = image.data.len() as i64;

        self.store
            .upload(&key, image.data, &image.content_type)
            .await?;

        debug!("Image uploaded: key={}, size={}", key, size);

        let url = self.store.object_url(&key);

        Ok(MediaAssetDto {
            public_id: key,
            secure_url: url.clone(),
            url,
            original_filename: image.original_filename,
            content_type: image.content_type,
            size,
            uploaded_at: Utc::now(),
        })
    }

    /// Upload a single image
    pub async fn upload_image(&self, image: UploadedImage) -> Result<MediaAssetDto> {
        let asset = self.store_image("images", image).await?;
        info!("Media asset stored: public_id={}", asset.public_id);
        Ok(asset)
    }

    /// Upload a batch of images; already-stored assets are not rolled back
    /// if a later one fails, the error names the failing file instead
    pub async fn upload_images(&self, images: Vec<UploadedImage>) -> Result<Vec<MediaAssetDto>> {
        let mut assets = Vec::with_capacity(images.len());
        for image in images {
            assets.push(self.store_image("images", image).await?);
        }

        info!("Media batch stored: count={}", assets.len());
        Ok(assets)
    }

    /// Upload the fixed unit-asset fields (cover + gallery)
    pub async fn upload_unit_assets(
        &self,
        images: Vec<(String, UploadedImage)>,
    ) -> Result<UnitAssetsDto> {
        let mut cover = None;
        let mut gallery = Vec::new();

        for (field, image) in images {
            let prefix = format!("units/{}", field);
            let asset = self.store_image(&prefix, image).await?;
            if field == "cover" {
                cover = Some(asset);
            } else {
                gallery.push(asset);
            }
        }

        info!(
            "Unit assets stored: cover={}, gallery={}",
            cover.is_some(),
            gallery.len()
        );

        Ok(UnitAssetsDto { cover, gallery })
    }

    /// Delete an asset by its public id; an unknown id is a 404
    pub async fn delete(&self, public_id: &str) -> Result<()> {
        if !self.store.exists(public_id).await? {
            return Err(AppError::NotFound(format!(
                "Media asset '{}' not found",
                public_id
            )));
        }

        self.store.delete(public_id).await?;

        info!("Media asset deleted: public_id={}", public_id);
        Ok(())
    }

    /// Synthesize direct and thumbnail URLs for an asset.
    /// Pure string work from configuration; existence is not verified.
    pub fn info(&self, public_id: &str) -> MediaInfoDto {
        MediaInfoDto {
            public_id: public_id.to_string(),
            url: self.store.object_url(public_id),
            thumbnail_url: self.store.thumbnail_url(public_id),
        }
    }
}
