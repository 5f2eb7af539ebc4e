use axum::{
    extract::{Path, State},
    Json,
};
use eyre::Result;
use rosteria_core::{
    errors::RosterError,
    models::musician::{Musician, SetActiveRequest, UpdateProfileRequest},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::musician_from_row,
    middleware::{auth::Principal, error_handling::AppError},
    ApiState,
};

/// The full roster, active and inactive, for administration.
#[axum::debug_handler]
pub async fn list_musicians(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
) -> Result<Json<Vec<Musician>>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let musicians = rosteria_db::repositories::musician::list(&state.db_pool)
        .await
        .map_err(RosterError::Database)?
        .into_iter()
        .map(musician_from_row)
        .collect();

    Ok(Json(musicians))
}

/// Toggles whether a musician appears in the availability filter.
/// Deactivation hides them from new rosters without touching history.
#[axum::debug_handler]
pub async fn set_active(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let updated =
        rosteria_db::repositories::musician::set_active(&state.db_pool, id, payload.active)
            .await
            .map_err(RosterError::Database)?;

    if updated == 0 {
        return Err(AppError(RosterError::NotFound(format!(
            "Musician with ID {} not found",
            id
        ))));
    }

    Ok(Json(serde_json::json!({ "active": payload.active })))
}

/// Soft delete. The row is tombstoned so past assignments keep their
/// musician.
#[axum::debug_handler]
pub async fn remove_musician(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let deleted = rosteria_db::repositories::musician::soft_delete(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?;

    if deleted == 0 {
        return Err(AppError(RosterError::NotFound(format!(
            "Musician with ID {} not found",
            id
        ))));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// The caller's own musician profile.
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
) -> Result<Json<Musician>, AppError> {
    let musician =
        rosteria_db::repositories::musician::find_by_account(&state.db_pool, principal.account_id)
            .await
            .map_err(RosterError::Database)?
            .ok_or_else(|| {
                RosterError::NotFound("No musician profile for this account".to_string())
            })?;

    Ok(Json(musician_from_row(musician)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(RosterError::Validation(
            "Name must not be empty".to_string(),
        )));
    }

    let updated = rosteria_db::repositories::musician::update_profile(
        &state.db_pool,
        principal.account_id,
        &payload.name,
        &payload.whatsapp,
    )
    .await
    .map_err(RosterError::Database)?;

    if updated == 0 {
        return Err(AppError(RosterError::NotFound(
            "No musician profile for this account".to_string(),
        )));
    }

    Ok(Json(serde_json::json!({ "updated": true })))
}
