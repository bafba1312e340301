use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Allowed MIME types for image uploads.
///
/// `image/jpg` is not a registered type but some browsers and older admin
/// clients still send it, so it stays on the list.
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Maximum size per image in bytes (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum number of files accepted by the batch upload endpoint
pub const MAX_BATCH_IMAGES: usize = 3;

/// Gallery field cap for the fixed unit-assets upload
pub const GALLERY_FIELD: &str = "gallery";
pub const GALLERY_MAX_FILES: usize = 10;

/// Check if a MIME type is allowed for image uploads
pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_MIME_TYPES.contains(&content_type)
}

/// Get file extension from content type
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Single-image upload request for OpenAPI documentation.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Batch upload request for OpenAPI documentation.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImagesDto {
    /// The images to upload (max 3)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: Vec<String>,
}

/// Reference metadata for an uploaded asset.
///
/// Bytes live with the storage provider; this is all the service keeps.
/// `secure_url` duplicates `url` for callers still on the legacy naming.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaAssetDto {
    pub public_id: String,
    pub url: String,
    pub secure_url: String,
    pub original_filename: String,
    pub content_type: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// Response DTO for the fixed unit-assets upload (cover + gallery)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UnitAssetsDto {
    pub cover: Option<MediaAssetDto>,
    pub gallery: Vec<MediaAssetDto>,
}

/// Request DTO for deleting an asset by its public id
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteMediaDto {
    #[validate(length(min = 1, message = "public_id is required"))]
    pub public_id: String,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteMediaResponseDto {
    pub deleted: bool,
}

/// Query params for the asset info endpoint
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct MediaInfoQuery {
    /// Public id (object key) of the asset
    #[validate(length(min = 1, message = "public_id is required"))]
    pub public_id: String,
}

/// Synthesized URLs for an asset; existence is never verified
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MediaInfoDto {
    pub public_id: String,
    pub url: String,
    pub thumbnail_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_allow_list_accepts_both_jpeg_spellings() {
        assert!(is_image_type_allowed("image/jpeg"));
        assert!(is_image_type_allowed("image/jpg"));
        assert!(is_image_type_allowed("image/png"));
        assert!(is_image_type_allowed("image/webp"));
    }

    #[test]
    fn image_allow_list_rejects_everything_else() {
        assert!(!is_image_type_allowed("application/pdf"));
        assert!(!is_image_type_allowed("image/gif"));
        assert!(!is_image_type_allowed("image/svg+xml"));
        assert!(!is_image_type_allowed(""));
    }

    #[test]
    fn extensions_follow_content_type() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/jpg"), Some("jpg"));
        assert_eq!(extension_for("image/webp"), Some("webp"));
        assert_eq!(extension_for("application/pdf"), None);
    }

    #[test]
    fn delete_requires_public_id() {
        let dto = DeleteMediaDto {
            public_id: String::new(),
        };
        assert!(dto.validate().is_err());
    }
}
