use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use eyre::Result;
use rosteria_core::{
    availability,
    errors::RosterError,
    models::{
        reference::Location,
        schedule::{
            AssignmentResponse, GetScheduleResponse, RehearsalInput, RespondRequest,
            SaveScheduleRequest, SaveScheduleResponse, ScheduleStatus, ScheduleSummary,
            TimeSlotInput, UpdateNotesRequest,
        },
    },
};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::period_from_row,
    middleware::{auth::Principal, error_handling::AppError},
    ApiState,
};

/// Ids of musicians eligible on `date`: active, non-deleted, and with
/// no unavailability period covering the date.
async fn eligible_ids_for(state: &ApiState, date: NaiveDate) -> Result<HashSet<Uuid>, AppError> {
    let candidates = rosteria_db::repositories::musician::list_active(&state.db_pool)
        .await
        .map_err(RosterError::Database)?;

    let periods: Vec<_> =
        rosteria_db::repositories::unavailability::list_covering(&state.db_pool, date)
            .await
            .map_err(RosterError::Database)?
            .into_iter()
            .map(period_from_row)
            .collect();

    let excluded = availability::unavailable_ids(&periods, date);

    Ok(candidates
        .into_iter()
        .map(|m| m.id)
        .filter(|id| !excluded.contains(id))
        .collect())
}

/// Drops roster rows for musicians who are ineligible on the schedule
/// date, then validates what is left. A request whose every musician
/// got pruned fails validation the same way an empty roster does.
async fn prune_and_validate(
    state: &ApiState,
    mut payload: SaveScheduleRequest,
) -> Result<SaveScheduleRequest, AppError> {
    let eligible = eligible_ids_for(state, payload.date).await?;
    payload.musicians = availability::prune_ineligible(payload.musicians, &eligible);
    payload.validate().map_err(AppError)?;
    Ok(payload)
}

async fn ensure_location_exists(state: &ApiState, location_id: Option<Uuid>) -> Result<(), AppError> {
    if let Some(id) = location_id {
        rosteria_db::repositories::location::find_by_id(&state.db_pool, id)
            .await
            .map_err(RosterError::Database)?
            .ok_or_else(|| RosterError::NotFound(format!("Location with ID {} not found", id)))?;
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Json(payload): Json<SaveScheduleRequest>,
) -> Result<Json<SaveScheduleResponse>, AppError> {
    principal.require_admin().map_err(AppError)?;

    ensure_location_exists(&state, payload.location_id).await?;
    let payload = prune_and_validate(&state, payload).await?;

    let fields = rosteria_db::repositories::schedule::ScheduleWrite {
        title: &payload.title,
        date: payload.date,
        location_id: payload.location_id,
        notes: payload.notes.as_deref(),
    };

    let db_schedule = rosteria_db::repositories::schedule::create(
        &state.db_pool,
        &fields,
        principal.account_id,
        &payload.slots,
        &payload.rehearsals,
        &payload.musicians,
    )
    .await
    .map_err(RosterError::Database)?;

    let status = ScheduleStatus::from_str(&db_schedule.status).map_err(AppError)?;

    Ok(Json(SaveScheduleResponse {
        id: db_schedule.id,
        status,
    }))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<GetScheduleResponse>, AppError> {
    let db_schedule = rosteria_db::repositories::schedule::find_by_id(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?
        .ok_or_else(|| RosterError::NotFound(format!("Schedule with ID {} not found", id)))?;

    let location = match db_schedule.location_id {
        Some(location_id) => {
            rosteria_db::repositories::location::find_by_id(&state.db_pool, location_id)
                .await
                .map_err(RosterError::Database)?
                .map(|l| Location {
                    id: l.id,
                    name: l.name,
                    address: l.address,
                })
        }
        None => None,
    };

    let slots = rosteria_db::repositories::schedule::slots_for(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?;
    let rehearsals = rosteria_db::repositories::schedule::rehearsals_for(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?;
    let assignments = rosteria_db::repositories::schedule::assignments_for(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?;

    let mut musicians = Vec::with_capacity(assignments.len());
    for row in assignments {
        musicians.push(AssignmentResponse {
            musician_id: row.musician_id,
            musician_name: row.musician_name,
            instrument_id: row.instrument_id,
            instrument_name: row.instrument_name,
            status: FromStr::from_str(&row.status).map_err(AppError)?,
            notes: row.notes,
        });
    }

    let response = GetScheduleResponse {
        id: db_schedule.id,
        title: db_schedule.title,
        date: db_schedule.date,
        location,
        notes: db_schedule.notes,
        status: ScheduleStatus::from_str(&db_schedule.status).map_err(AppError)?,
        slots: slots
            .into_iter()
            .map(|s| TimeSlotInput {
                start_time: s.start_time,
                end_time: s.end_time,
            })
            .collect(),
        rehearsals: rehearsals
            .into_iter()
            .map(|r| RehearsalInput {
                date: r.date,
                start_time: r.start_time,
            })
            .collect(),
        musicians,
        created_at: db_schedule.created_at,
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    _principal: Principal,
) -> Result<Json<Vec<ScheduleSummary>>, AppError> {
    let db_schedules = rosteria_db::repositories::schedule::list(&state.db_pool)
        .await
        .map_err(RosterError::Database)?;

    let mut summaries = Vec::with_capacity(db_schedules.len());
    for schedule in db_schedules {
        summaries.push(ScheduleSummary {
            id: schedule.id,
            title: schedule.title,
            date: schedule.date,
            status: ScheduleStatus::from_str(&schedule.status).map_err(AppError)?,
        });
    }

    Ok(Json(summaries))
}

/// Wholesale replacement. Every musician response on the schedule is
/// reset to pending, because the roster they responded to may have
/// changed underneath them.
#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveScheduleRequest>,
) -> Result<Json<SaveScheduleResponse>, AppError> {
    principal.require_admin().map_err(AppError)?;

    ensure_location_exists(&state, payload.location_id).await?;
    let payload = prune_and_validate(&state, payload).await?;

    let fields = rosteria_db::repositories::schedule::ScheduleWrite {
        title: &payload.title,
        date: payload.date,
        location_id: payload.location_id,
        notes: payload.notes.as_deref(),
    };

    let db_schedule = rosteria_db::repositories::schedule::update(
        &state.db_pool,
        id,
        &fields,
        &payload.slots,
        &payload.rehearsals,
        &payload.musicians,
    )
    .await
    .map_err(RosterError::Database)?
    .ok_or_else(|| RosterError::NotFound(format!("Schedule with ID {} not found", id)))?;

    let status = ScheduleStatus::from_str(&db_schedule.status).map_err(AppError)?;

    Ok(Json(SaveScheduleResponse {
        id: db_schedule.id,
        status,
    }))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let deleted = rosteria_db::repositories::schedule::soft_delete(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?;

    if deleted == 0 {
        return Err(AppError(RosterError::NotFound(format!(
            "Schedule with ID {} not found",
            id
        ))));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Draft -> confirmed. Confirming anything but a draft is a validation
/// error, not a no-op.
#[axum::debug_handler]
pub async fn confirm_schedule(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveScheduleResponse>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let db_schedule = rosteria_db::repositories::schedule::find_by_id(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?
        .ok_or_else(|| RosterError::NotFound(format!("Schedule with ID {} not found", id)))?;

    let status = ScheduleStatus::from_str(&db_schedule.status).map_err(AppError)?;
    if status != ScheduleStatus::Draft {
        return Err(AppError(RosterError::Validation(format!(
            "Only a draft schedule can be confirmed, this one is {}",
            status
        ))));
    }

    rosteria_db::repositories::schedule::set_status(
        &state.db_pool,
        id,
        ScheduleStatus::Confirmed.as_str(),
    )
    .await
    .map_err(RosterError::Database)?;

    Ok(Json(SaveScheduleResponse {
        id,
        status: ScheduleStatus::Confirmed,
    }))
}

/// Draft or confirmed -> cancelled. Cancelled is terminal.
#[axum::debug_handler]
pub async fn cancel_schedule(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveScheduleResponse>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let db_schedule = rosteria_db::repositories::schedule::find_by_id(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?
        .ok_or_else(|| RosterError::NotFound(format!("Schedule with ID {} not found", id)))?;

    let status = ScheduleStatus::from_str(&db_schedule.status).map_err(AppError)?;
    if status == ScheduleStatus::Cancelled {
        return Err(AppError(RosterError::Validation(
            "Schedule is already cancelled".to_string(),
        )));
    }

    rosteria_db::repositories::schedule::set_status(
        &state.db_pool,
        id,
        ScheduleStatus::Cancelled.as_str(),
    )
    .await
    .map_err(RosterError::Database)?;

    Ok(Json(SaveScheduleResponse {
        id,
        status: ScheduleStatus::Cancelled,
    }))
}

/// Records the calling musician's confirm/decline for their assignment
/// on this schedule. A response never creates an assignment.
#[axum::debug_handler]
pub async fn respond(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !payload.status.is_response() {
        return Err(AppError(RosterError::Validation(format!(
            "A response must be confirmed or declined, not {}",
            payload.status
        ))));
    }

    let musician =
        rosteria_db::repositories::musician::find_by_account(&state.db_pool, principal.account_id)
            .await
            .map_err(RosterError::Database)?
            .ok_or_else(|| {
                RosterError::NotFound("No musician profile for this account".to_string())
            })?;

    let updated = rosteria_db::repositories::assignment::update_response(
        &state.db_pool,
        id,
        musician.id,
        payload.status.as_str(),
        payload.notes.as_deref(),
    )
    .await
    .map_err(RosterError::Database)?;

    if updated == 0 {
        return Err(AppError(RosterError::NotFound(
            "You are not assigned to this schedule".to_string(),
        )));
    }

    Ok(Json(serde_json::json!({ "status": payload.status })))
}

/// Notes-only update on the caller's assignment, valid at any status.
#[axum::debug_handler]
pub async fn update_notes(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNotesRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let musician =
        rosteria_db::repositories::musician::find_by_account(&state.db_pool, principal.account_id)
            .await
            .map_err(RosterError::Database)?
            .ok_or_else(|| {
                RosterError::NotFound("No musician profile for this account".to_string())
            })?;

    let updated = rosteria_db::repositories::assignment::update_notes(
        &state.db_pool,
        id,
        musician.id,
        &payload.notes,
    )
    .await
    .map_err(RosterError::Database)?;

    if updated == 0 {
        return Err(AppError(RosterError::NotFound(
            "You are not assigned to this schedule".to_string(),
        )));
    }

    Ok(Json(serde_json::json!({ "updated": true })))
}
