use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedules", post(handlers::schedule::create_schedule))
        .route("/api/schedules", get(handlers::schedule::list_schedules))
        .route("/api/schedules/:id", get(handlers::schedule::get_schedule))
        .route(
            "/api/schedules/:id",
            put(handlers::schedule::update_schedule),
        )
        .route(
            "/api/schedules/:id",
            delete(handlers::schedule::delete_schedule),
        )
        .route(
            "/api/schedules/:id/confirm",
            post(handlers::schedule::confirm_schedule),
        )
        .route(
            "/api/schedules/:id/cancel",
            post(handlers::schedule::cancel_schedule),
        )
        .route("/api/schedules/:id/respond", post(handlers::schedule::respond))
        .route(
            "/api/schedules/:id/notes",
            put(handlers::schedule::update_notes),
        )
}
