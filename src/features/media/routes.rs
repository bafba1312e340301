use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::features::media::dtos::{GALLERY_MAX_FILES, MAX_BATCH_IMAGES, MAX_IMAGE_SIZE};
use crate::features::media::handlers;
use crate::features::media::services::MediaService;

// Multipart framing overhead on top of the raw file bytes
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create routes for the media feature (protected; role checks live in handlers)
pub fn routes(service: Arc<MediaService>) -> Router {
    Router::new()
        .route(
            "/api/media/upload",
            post(handlers::upload_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD)),
        )
        .route(
            "/api/media/upload/batch",
            post(handlers::upload_images).layer(DefaultBodyLimit::max(
                MAX_IMAGE_SIZE * MAX_BATCH_IMAGES + MULTIPART_OVERHEAD,
            )),
        )
        .route(
            "/api/media/upload/unit-assets",
            post(handlers::upload_unit_assets).layer(DefaultBodyLimit::max(
                MAX_IMAGE_SIZE * (GALLERY_MAX_FILES + 1) + MULTIPART_OVERHEAD,
            )),
        )
        .route("/api/media", delete(handlers::delete_media))
        .route("/api/media/info", get(handlers::get_media_info))
        .with_state(service)
}
