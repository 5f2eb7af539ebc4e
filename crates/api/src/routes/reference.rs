use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/instruments", get(handlers::reference::list_instruments))
        .route("/api/locations", get(handlers::reference::list_locations))
}
