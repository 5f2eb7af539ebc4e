use axum::{
    extract::{Path, State},
    Json,
};
use eyre::Result;
use rosteria_core::{
    errors::RosterError,
    models::unavailability::{CreateUnavailabilityRequest, UnavailabilityPeriod},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::period_from_row,
    middleware::{auth::Principal, error_handling::AppError},
    ApiState,
};

/// Resolves the calling account to its musician profile.
async fn own_musician_id(state: &ApiState, principal: Principal) -> Result<Uuid, AppError> {
    let musician =
        rosteria_db::repositories::musician::find_by_account(&state.db_pool, principal.account_id)
            .await
            .map_err(RosterError::Database)?
            .ok_or_else(|| {
                RosterError::NotFound("No musician profile for this account".to_string())
            })?;

    Ok(musician.id)
}

/// The caller's own unavailability periods, earliest first.
#[axum::debug_handler]
pub async fn list_mine(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
) -> Result<Json<Vec<UnavailabilityPeriod>>, AppError> {
    let musician_id = own_musician_id(&state, principal).await?;

    let periods = rosteria_db::repositories::unavailability::list_for_musician(
        &state.db_pool,
        musician_id,
    )
    .await
    .map_err(RosterError::Database)?
    .into_iter()
    .map(period_from_row)
    .collect();

    Ok(Json(periods))
}

#[axum::debug_handler]
pub async fn create_period(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Json(payload): Json<CreateUnavailabilityRequest>,
) -> Result<Json<UnavailabilityPeriod>, AppError> {
    payload.validate().map_err(AppError)?;

    let musician_id = own_musician_id(&state, principal).await?;

    let period = rosteria_db::repositories::unavailability::create(
        &state.db_pool,
        musician_id,
        payload.start_date,
        payload.end_date,
        payload.reason.as_deref(),
    )
    .await
    .map_err(RosterError::Database)?;

    Ok(Json(period_from_row(period)))
}

/// Deletion is scoped to the caller's own periods; someone else's
/// period id reads as not found.
#[axum::debug_handler]
pub async fn remove_period(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let musician_id = own_musician_id(&state, principal).await?;

    let deleted =
        rosteria_db::repositories::unavailability::soft_delete(&state.db_pool, id, musician_id)
            .await
            .map_err(RosterError::Database)?;

    if deleted == 0 {
        return Err(AppError(RosterError::NotFound(format!(
            "Unavailability period with ID {} not found",
            id
        ))));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
