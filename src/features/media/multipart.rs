//! Multipart extraction for image uploads.
//!
//! Every upload endpoint funnels through here, so the MIME allow-list, the
//! per-file size ceiling, and the per-request count caps are enforced before
//! any handler touches storage. Each violation gets its own message:
//! type, size, count, and unexpected-field failures are distinguishable
//! on the client side.

use axum::extract::Multipart;

use crate::core::error::{AppError, Result};
use crate::features::media::dtos::{is_image_type_allowed, ALLOWED_IMAGE_MIME_TYPES, MAX_IMAGE_SIZE};

/// An image pulled out of a multipart request, validated but not yet stored
#[derive(Debug)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
}

/// Reject images with a disallowed type or over the size ceiling
fn validate_image(content_type: &str, size: usize) -> Result<()> {
    if !is_image_type_allowed(content_type) {
        return Err(AppError::BadRequest(format!(
            "File type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_IMAGE_MIME_TYPES.join(", ")
        )));
    }

    if size > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} bytes ({} MB)",
            MAX_IMAGE_SIZE,
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    Ok(())
}

async fn read_image(field: axum::extract::multipart::Field<'_>) -> Result<UploadedImage> {
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let original_filename = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unnamed".to_string());

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;

    validate_image(&content_type, data.len())?;

    Ok(UploadedImage {
        data: data.to_vec(),
        original_filename,
        content_type,
    })
}

/// Extract exactly one image from the named field.
///
/// No file → 400; a file on any other field → unexpected-field 400.
pub async fn collect_single(mut multipart: Multipart, field_name: &str) -> Result<UploadedImage> {
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == field_name {
            if image.is_some() {
                return Err(AppError::BadRequest(format!(
                    "Too many files. Field '{}' accepts a single file",
                    field_name
                )));
            }
            image = Some(read_image(field).await?);
        } else if field.file_name().is_some() {
            return Err(AppError::BadRequest(format!(
                "Unexpected upload field '{}'. Expected '{}'",
                name, field_name
            )));
        }
        // Non-file form fields are ignored
    }

    image.ok_or_else(|| AppError::BadRequest(format!("File is required in field '{}'", field_name)))
}

/// Extract up to `max_files` images from the named field.
pub async fn collect_many(
    mut multipart: Multipart,
    field_name: &str,
    max_files: usize,
) -> Result<Vec<UploadedImage>> {
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == field_name {
            if images.len() == max_files {
                return Err(AppError::BadRequest(format!(
                    "Too many files. Field '{}' accepts at most {} files",
                    field_name, max_files
                )));
            }
            images.push(read_image(field).await?);
        } else if field.file_name().is_some() {
            return Err(AppError::BadRequest(format!(
                "Unexpected upload field '{}'. Expected '{}'",
                name, field_name
            )));
        }
    }

    if images.is_empty() {
        return Err(AppError::BadRequest(format!(
            "At least one file is required in field '{}'",
            field_name
        )));
    }

    Ok(images)
}

/// Extract images from a fixed set of named fields, each with its own cap.
///
/// Returns `(field_name, image)` pairs in arrival order. Files on fields
/// outside the set are rejected, matching the single/many entry points.
pub async fn collect_named(
    mut multipart: Multipart,
    fields: &[(&str, usize)],
) -> Result<Vec<(String, UploadedImage)>> {
    let mut collected: Vec<(String, UploadedImage)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match fields.iter().find(|(allowed, _)| *allowed == name) {
            Some((_, cap)) => {
                let count = collected.iter().filter(|(n, _)| *n == name).count();
                if count == *cap {
                    return Err(AppError::BadRequest(format!(
                        "Too many files. Field '{}' accepts at most {} files",
                        name, cap
                    )));
                }
                let image = read_image(field).await?;
                collected.push((name, image));
            }
            None if field.file_name().is_some() => {
                return Err(AppError::BadRequest(format!(
                    "Unexpected upload field '{}'",
                    name
                )));
            }
            None => {}
        }
    }

    if collected.is_empty() {
        return Err(AppError::BadRequest(
            "At least one file is required".to_string(),
        ));
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Router};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;

    async fn single_endpoint(multipart: Multipart) -> Result<StatusCode> {
        collect_single(multipart, "file").await?;
        Ok(StatusCode::OK)
    }

    async fn many_endpoint(multipart: Multipart) -> Result<StatusCode> {
        collect_many(multipart, "files", 3).await?;
        Ok(StatusCode::OK)
    }

    async fn named_endpoint(multipart: Multipart) -> Result<StatusCode> {
        collect_named(multipart, &[("cover", 1), ("gallery", 2)]).await?;
        Ok(StatusCode::OK)
    }

    fn server() -> TestServer {
        let router = Router::new()
            .route("/single", post(single_endpoint))
            .route("/many", post(many_endpoint))
            .route("/named", post(named_endpoint));
        TestServer::new(router).unwrap()
    }

    fn png_part() -> Part {
        Part::bytes(vec![0u8; 64])
            .file_name("image.png")
            .mime_type("image/png")
    }

    #[tokio::test]
    async fn zero_files_is_a_bad_request() {
        let server = server();

        let form = MultipartForm::new().add_text("note", "no file attached");
        let response = server.post("/single").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("File is required"));

        let form = MultipartForm::new().add_text("note", "no file attached");
        let response = server.post("/many").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("At least one file is required"));
    }

    #[tokio::test]
    async fn batch_accepts_files_up_to_the_cap() {
        let server = server();

        let form = MultipartForm::new()
            .add_part("files", png_part())
            .add_part("files", png_part())
            .add_part("files", png_part());
        let response = server.post("/many").multipart(form).await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn batch_over_the_cap_names_the_count_limit() {
        let server = server();

        let form = MultipartForm::new()
            .add_part("files", png_part())
            .add_part("files", png_part())
            .add_part("files", png_part())
            .add_part("files", png_part());
        let response = server.post("/many").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Too many files"));
    }

    #[tokio::test]
    async fn file_on_an_unexpected_field_is_rejected() {
        let server = server();

        let form = MultipartForm::new().add_part("attachment", png_part());
        let response = server.post("/single").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Unexpected upload field"));

        let form = MultipartForm::new().add_part("avatar", png_part());
        let response = server.post("/named").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Unexpected upload field"));
    }

    #[tokio::test]
    async fn named_fields_enforce_their_own_caps() {
        let server = server();

        let form = MultipartForm::new()
            .add_part("cover", png_part())
            .add_part("gallery", png_part())
            .add_part("gallery", png_part());
        let response = server.post("/named").multipart(form).await;

        response.assert_status(StatusCode::OK);

        let form = MultipartForm::new()
            .add_part("cover", png_part())
            .add_part("cover", png_part());
        let response = server.post("/named").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Too many files"));
    }

    #[test]
    fn validation_passes_for_allowed_type_under_ceiling() {
        assert!(validate_image("image/png", 1024).is_ok());
        assert!(validate_image("image/jpeg", MAX_IMAGE_SIZE).is_ok());
    }

    #[test]
    fn disallowed_type_is_named_in_the_error() {
        let err = validate_image("application/pdf", 10).unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert!(msg.contains("application/pdf"));
                assert!(msg.contains("not allowed"));
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn oversized_file_gets_the_size_message() {
        let err = validate_image("image/png", MAX_IMAGE_SIZE + 1).unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("too large")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }
}
