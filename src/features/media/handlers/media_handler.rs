use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireContentManager};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::media::dtos::{
    DeleteMediaDto, DeleteMediaResponseDto, MediaAssetDto, MediaInfoDto, MediaInfoQuery,
    UnitAssetsDto, UploadImageDto, UploadImagesDto, GALLERY_FIELD, GALLERY_MAX_FILES,
    MAX_BATCH_IMAGES,
};
use crate::features::media::multipart;
use crate::features::media::services::MediaService;
use crate::shared::types::ApiResponse;

/// Upload a single image
///
/// Accepts multipart/form-data with the image in the `file` field.
#[utoipa::path(
    post,
    path = "/api/media/upload",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Single image in the `file` field",
    ),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<MediaAssetDto>),
        (status = 400, description = "Missing file, disallowed type, or file too large"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or manager access required")
    ),
    tag = "media",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn upload_image(
    RequireContentManager(_user): RequireContentManager,
    State(service): State<Arc<MediaService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MediaAssetDto>>)> {
    let image = multipart::collect_single(multipart, "file").await?;
    let asset = service.upload_image(image).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(asset),
            Some("Image uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// Upload a batch of images
///
/// Accepts multipart/form-data with up to 3 images in the `files` field.
/// Response items carry both `url`/`public_id` and the legacy `secure_url`
/// alias.
#[utoipa::path(
    post,
    path = "/api/media/upload/batch",
    request_body(
        content = UploadImagesDto,
        content_type = "multipart/form-data",
        description = "Up to 3 images in the `files` field",
    ),
    responses(
        (status = 201, description = "Images uploaded", body = ApiResponse<Vec<MediaAssetDto>>),
        (status = 400, description = "No files, too many files, disallowed type, or file too large"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or manager access required")
    ),
    tag = "media",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn upload_images(
    RequireContentManager(_user): RequireContentManager,
    State(service): State<Arc<MediaService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Vec<MediaAssetDto>>>)> {
    let images = multipart::collect_many(multipart, "files", MAX_BATCH_IMAGES).await?;
    let assets = service.upload_images(images).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(assets),
            Some("Images uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// Upload unit assets on fixed fields: `cover` (one) and `gallery` (up to 10)
#[utoipa::path(
    post,
    path = "/api/media/upload/unit-assets",
    request_body(
        content = UploadImagesDto,
        content_type = "multipart/form-data",
        description = "Images on the fixed `cover` (max 1) and `gallery` (max 10) fields",
    ),
    responses(
        (status = 201, description = "Unit assets uploaded", body = ApiResponse<UnitAssetsDto>),
        (status = 400, description = "Unexpected field, too many files, disallowed type, or file too large"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or manager access required")
    ),
    tag = "media",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn upload_unit_assets(
    RequireContentManager(_user): RequireContentManager,
    State(service): State<Arc<MediaService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UnitAssetsDto>>)> {
    let images =
        multipart::collect_named(multipart, &[("cover", 1), (GALLERY_FIELD, GALLERY_MAX_FILES)])
            .await?;
    let assets = service.upload_unit_assets(images).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(assets),
            Some("Unit assets uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// Delete an asset by its public id
#[utoipa::path(
    delete,
    path = "/api/media",
    request_body = DeleteMediaDto,
    responses(
        (status = 200, description = "Asset deleted", body = ApiResponse<DeleteMediaResponseDto>),
        (status = 400, description = "Missing public_id"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Asset not found")
    ),
    tag = "media",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete_media(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<MediaService>>,
    AppJson(dto): AppJson<DeleteMediaDto>,
) -> Result<Json<ApiResponse<DeleteMediaResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.delete(&dto.public_id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteMediaResponseDto { deleted: true }),
        Some("Asset deleted successfully".to_string()),
        None,
    )))
}

/// Synthesize direct and thumbnail URLs for an asset
///
/// Pure URL synthesis from configuration; the asset's existence is not
/// verified.
#[utoipa::path(
    get,
    path = "/api/media/info",
    params(MediaInfoQuery),
    responses(
        (status = 200, description = "Synthesized asset URLs", body = ApiResponse<MediaInfoDto>),
        (status = 400, description = "Missing public_id"),
        (status = 401, description = "Authentication required")
    ),
    tag = "media",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn get_media_info(
    _user: AuthenticatedUser,
    State(service): State<Arc<MediaService>>,
    Query(query): Query<MediaInfoQuery>,
) -> Result<Json<ApiResponse<MediaInfoDto>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let info = service.info(&query.public_id);

    Ok(Json(ApiResponse::success(Some(info), None, None)))
}
