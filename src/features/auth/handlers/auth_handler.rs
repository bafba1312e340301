use axum::Json;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;

/// Echo the authenticated identity resolved from the access token cookie
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated identity", body = ApiResponse<AuthenticatedUser>),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Account is not active")
    ),
    tag = "auth",
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Result<Json<ApiResponse<AuthenticatedUser>>> {
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}
