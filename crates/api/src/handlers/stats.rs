use axum::{extract::State, Json};
use chrono::{Datelike, NaiveDate, Utc};
use eyre::Result;
use rosteria_core::{
    errors::RosterError,
    models::schedule::AssignmentStatus,
    stats::{
        personal_summary, rank_top_musicians, DashboardStats, ParticipationRecord,
        PersonalDashboard, ResponseTally, UpcomingAssignment,
    },
};
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    middleware::{auth::Principal, error_handling::AppError},
    ApiState,
};

/// How many musicians the dashboard ranking shows.
const TOP_MUSICIANS_LIMIT: usize = 5;

/// How many upcoming assignments the personal dashboard shows.
const UPCOMING_LIMIT: usize = 5;

/// First and last day of the month containing `today`.
fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(today);

    (first, last)
}

/// Administrator dashboard: current-month schedule and response counts,
/// active roster size, and the all-time participation ranking.
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
) -> Result<Json<DashboardStats>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let today = Utc::now().date_naive();
    let (from, to) = month_bounds(today);

    let total_schedules =
        rosteria_db::repositories::schedule::count_in_range(&state.db_pool, from, to)
            .await
            .map_err(RosterError::Database)?;

    let active_musicians = rosteria_db::repositories::musician::count_active(&state.db_pool)
        .await
        .map_err(RosterError::Database)?;

    let mut responses = ResponseTally::default();
    for status in
        rosteria_db::repositories::assignment::statuses_in_range(&state.db_pool, from, to)
            .await
            .map_err(RosterError::Database)?
    {
        responses.add(AssignmentStatus::from_str(&status).map_err(AppError)?);
    }

    let mut records = Vec::new();
    for row in rosteria_db::repositories::assignment::history(&state.db_pool)
        .await
        .map_err(RosterError::Database)?
    {
        records.push(ParticipationRecord {
            musician_name: row.musician_name,
            status: AssignmentStatus::from_str(&row.status).map_err(AppError)?,
        });
    }

    Ok(Json(DashboardStats {
        total_schedules,
        active_musicians,
        responses,
        top_musicians: rank_top_musicians(&records, TOP_MUSICIANS_LIMIT),
    }))
}

/// A musician's own dashboard: response tallies, participation rate,
/// and their next few schedules.
#[axum::debug_handler]
pub async fn personal(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
) -> Result<Json<PersonalDashboard>, AppError> {
    let musician =
        rosteria_db::repositories::musician::find_by_account(&state.db_pool, principal.account_id)
            .await
            .map_err(RosterError::Database)?
            .ok_or_else(|| {
                RosterError::NotFound("No musician profile for this account".to_string())
            })?;

    let rows = rosteria_db::repositories::assignment::for_musician(&state.db_pool, musician.id)
        .await
        .map_err(RosterError::Database)?;

    let mut statuses = Vec::with_capacity(rows.len());
    let mut assignments = Vec::with_capacity(rows.len());
    for row in rows {
        let status = AssignmentStatus::from_str(&row.status).map_err(AppError)?;
        statuses.push(status);
        assignments.push(UpcomingAssignment {
            schedule_id: row.schedule_id,
            title: row.title,
            date: row.date,
            status,
        });
    }

    let stats = personal_summary(statuses);

    let today = Utc::now().date_naive();
    let mut upcoming: Vec<_> = assignments
        .into_iter()
        .filter(|a| a.date >= today)
        .collect();
    upcoming.sort_by_key(|a| a.date);
    upcoming.truncate(UPCOMING_LIMIT);

    Ok(Json(PersonalDashboard { stats, upcoming }))
}
