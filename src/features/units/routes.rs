use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::units::handlers;
use crate::features::units::services::UnitService;

/// Create routes for the units feature (protected; role checks live in handlers)
pub fn routes(service: Arc<UnitService>) -> Router {
    Router::new()
        .route(
            "/api/units",
            post(handlers::create_unit).get(handlers::list_units),
        )
        .route("/api/units/reorder", post(handlers::reorder_units))
        .route(
            "/api/units/{id}",
            get(handlers::get_unit)
                .put(handlers::update_unit)
                .delete(handlers::delete_unit),
        )
        .with_state(service)
}
