use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireContentManager};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Missing or invalid name"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or manager access required"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "categories",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create_category(
    RequireContentManager(_user): RequireContentManager,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Category created successfully".to_string()),
            None,
        )),
    ))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    tag = "categories",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn list_categories(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list().await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn get_category(
    _user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Update a category (partial fields)
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Updated category", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or manager access required"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_category(
    RequireContentManager(_user): RequireContentManager,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;

    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted successfully".to_string()),
        None,
    )))
}
