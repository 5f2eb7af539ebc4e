use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/invitations",
            post(handlers::invitation::issue_invitation),
        )
        .route(
            "/api/invitations",
            get(handlers::invitation::list_invitations),
        )
        .route(
            "/api/invitations/:id/resend",
            post(handlers::invitation::resend_invitation),
        )
        .route(
            "/api/invitations/verify",
            get(handlers::invitation::verify_invitation),
        )
        .route(
            "/api/invitations/accept",
            post(handlers::invitation::accept_invitation),
        )
}
