//! Role-based authorization guards.
//!
//! The auth middleware has already attached an [`AuthenticatedUser`] to the
//! request by the time these run; each guard checks the flat role set a
//! route accepts and rejects everyone else with 403.
//!
//! Roles:
//! - ADMIN: full access, the only role allowed to delete
//! - MANAGER: may create and update content
//! - EMPLOYEE: read-only

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authenticated_user(parts: &Parts) -> Result<AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Auth("User not authenticated".to_string()))
}

/// Guard for admin-only routes (deletes, destructive media operations).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user))
    }
}

/// Guard for content mutations (create, update, reorder, upload).
///
/// Allows ADMIN and MANAGER.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireContentManager(user): RequireContentManager) { ... }
/// ```
pub struct RequireContentManager(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireContentManager
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.can_manage_content() {
            return Err(AppError::Forbidden(
                "Admin or manager access required".to_string(),
            ));
        }

        Ok(RequireContentManager(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::UserRole;
    use crate::shared::test_helpers::with_user;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> Json<String> {
        Json(user.sub)
    }

    async fn manager_or_admin(RequireContentManager(user): RequireContentManager) -> Json<String> {
        Json(user.sub)
    }

    fn router() -> Router {
        Router::new()
            .route("/admin", get(admin_only))
            .route("/manage", get(manager_or_admin))
    }

    #[tokio::test]
    async fn admin_passes_both_guards() {
        let server = TestServer::new(with_user(router(), UserRole::Admin)).unwrap();

        server.get("/admin").await.assert_status(StatusCode::OK);
        server.get("/manage").await.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn manager_can_manage_but_not_administer() {
        let server = TestServer::new(with_user(router(), UserRole::Manager)).unwrap();

        server
            .get("/admin")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server.get("/manage").await.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn employee_is_rejected_by_both_guards() {
        let server = TestServer::new(with_user(router(), UserRole::Employee)).unwrap();

        server
            .get("/admin")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .get("/manage")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unauthenticated_request_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();

        server
            .get("/admin")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
