#[cfg(test)]
use crate::features::auth::model::{AccountStatus, AuthenticatedUser, UserRole};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn test_user(role: UserRole) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-user".to_string(),
        role,
        status: AccountStatus::Active,
    }
}

/// Wrap a router with middleware that injects an already-authenticated user,
/// standing in for the cookie-JWT middleware in handler tests.
#[cfg(test)]
pub fn with_user(router: Router, role: UserRole) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| async move {
            request.extensions_mut().insert(test_user(role));
            let response: Response = next.run(request).await;
            response
        },
    ))
}
