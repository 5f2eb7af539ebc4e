use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/unavailability",
            get(handlers::unavailability::list_mine),
        )
        .route(
            "/api/unavailability",
            post(handlers::unavailability::create_period),
        )
        .route(
            "/api/unavailability/:id",
            delete(handlers::unavailability::remove_period),
        )
}
