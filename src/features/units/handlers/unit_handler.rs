use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireContentManager};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::units::dtos::{
    CreateUnitDto, ListUnitsQuery, ReorderUnitsDto, UnitResponseDto, UpdateUnitDto,
};
use crate::features::units::services::UnitService;
use crate::shared::types::ApiResponse;

/// Create a unit at the end of its category's sequence
#[utoipa::path(
    post,
    path = "/api/units",
    request_body = CreateUnitDto,
    responses(
        (status = 201, description = "Unit created", body = ApiResponse<UnitResponseDto>),
        (status = 400, description = "Missing or invalid title"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or manager access required"),
        (status = 404, description = "Category not found")
    ),
    tag = "units",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create_unit(
    RequireContentManager(_user): RequireContentManager,
    State(service): State<Arc<UnitService>>,
    AppJson(dto): AppJson<CreateUnitDto>,
) -> Result<(StatusCode, Json<ApiResponse<UnitResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let unit = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(unit),
            Some("Unit created successfully".to_string()),
            None,
        )),
    ))
}

/// List units, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/units",
    params(ListUnitsQuery),
    responses(
        (status = 200, description = "List of units", body = ApiResponse<Vec<UnitResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    tag = "units",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn list_units(
    _user: AuthenticatedUser,
    State(service): State<Arc<UnitService>>,
    Query(query): Query<ListUnitsQuery>,
) -> Result<Json<ApiResponse<Vec<UnitResponseDto>>>> {
    let units = service.list(query.category_id).await?;
    Ok(Json(ApiResponse::success(Some(units), None, None)))
}

/// Get unit by id
#[utoipa::path(
    get,
    path = "/api/units/{id}",
    params(
        ("id" = Uuid, Path, description = "Unit id")
    ),
    responses(
        (status = 200, description = "Unit found", body = ApiResponse<UnitResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Unit not found")
    ),
    tag = "units",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn get_unit(
    _user: AuthenticatedUser,
    State(service): State<Arc<UnitService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UnitResponseDto>>> {
    let unit = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(unit), None, None)))
}

/// Update a unit (partial fields)
#[utoipa::path(
    put,
    path = "/api/units/{id}",
    params(
        ("id" = Uuid, Path, description = "Unit id")
    ),
    request_body = UpdateUnitDto,
    responses(
        (status = 200, description = "Updated unit", body = ApiResponse<UnitResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or manager access required"),
        (status = 404, description = "Unit not found")
    ),
    tag = "units",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_unit(
    RequireContentManager(_user): RequireContentManager,
    State(service): State<Arc<UnitService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateUnitDto>,
) -> Result<Json<ApiResponse<UnitResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let unit = service.update(id, dto).await?;

    Ok(Json(ApiResponse::success(Some(unit), None, None)))
}

/// Delete a unit and close the position gap
#[utoipa::path(
    delete,
    path = "/api/units/{id}",
    params(
        ("id" = Uuid, Path, description = "Unit id")
    ),
    responses(
        (status = 200, description = "Unit deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Unit not found")
    ),
    tag = "units",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn delete_unit(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<UnitService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Unit deleted successfully".to_string()),
        None,
    )))
}

/// Atomically rewrite a category's unit order
///
/// The request must list every unit of the category exactly once; on any
/// mismatch nothing is written and the current order stands.
#[utoipa::path(
    post,
    path = "/api/units/reorder",
    request_body = ReorderUnitsDto,
    responses(
        (status = 200, description = "Units in their new order", body = ApiResponse<Vec<UnitResponseDto>>),
        (status = 400, description = "Duplicate, foreign, or missing unit ids"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin or manager access required"),
        (status = 404, description = "Category has no units")
    ),
    tag = "units",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn reorder_units(
    RequireContentManager(_user): RequireContentManager,
    State(service): State<Arc<UnitService>>,
    AppJson(dto): AppJson<ReorderUnitsDto>,
) -> Result<Json<ApiResponse<Vec<UnitResponseDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let units = service.reorder(dto).await?;

    Ok(Json(ApiResponse::success(
        Some(units),
        Some("Units reordered successfully".to_string()),
        None,
    )))
}
