use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use eyre::Result;
use rosteria_core::{availability, errors::RosterError, models::musician::Musician};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    handlers::{musician_from_row, period_from_row},
    middleware::{auth::Principal, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

/// Musicians who can be placed on a schedule dated `date`: active,
/// not soft-deleted, and with no unavailability period covering it.
#[axum::debug_handler]
pub async fn list_available(
    State(state): State<Arc<ApiState>>,
    _principal: Principal,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Musician>>, AppError> {
    let candidates = rosteria_db::repositories::musician::list_active(&state.db_pool)
        .await
        .map_err(RosterError::Database)?
        .into_iter()
        .map(musician_from_row)
        .collect();

    let periods: Vec<_> =
        rosteria_db::repositories::unavailability::list_covering(&state.db_pool, query.date)
            .await
            .map_err(RosterError::Database)?
            .into_iter()
            .map(period_from_row)
            .collect();

    let eligible = availability::eligible_musicians(candidates, &periods, query.date);

    Ok(Json(eligible))
}
