use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/musicians", get(handlers::musician::list_musicians))
        .route(
            "/api/musicians/:id/active",
            put(handlers::musician::set_active),
        )
        .route(
            "/api/musicians/:id",
            delete(handlers::musician::remove_musician),
        )
        .route("/api/profile", get(handlers::musician::get_profile))
        .route("/api/profile", put(handlers::musician::update_profile))
}
