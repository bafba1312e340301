use axum::{routing::get, Router};

use super::handlers::get_me;

/// Routes for the auth feature (protected; the cookie middleware runs first)
pub fn routes() -> Router {
    Router::new().route("/api/auth/me", get(get_me))
}
