use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/stats/dashboard", get(handlers::stats::dashboard))
        .route("/api/stats/me", get(handlers::stats::personal))
}
