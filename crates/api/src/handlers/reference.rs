use axum::{extract::State, Json};
use eyre::Result;
use rosteria_core::{
    errors::RosterError,
    models::reference::{Instrument, Location},
};
use std::sync::Arc;

use crate::{
    middleware::{auth::Principal, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_instruments(
    State(state): State<Arc<ApiState>>,
    _principal: Principal,
) -> Result<Json<Vec<Instrument>>, AppError> {
    let instruments = rosteria_db::repositories::instrument::list(&state.db_pool)
        .await
        .map_err(RosterError::Database)?
        .into_iter()
        .map(|i| Instrument {
            id: i.id,
            name: i.name,
        })
        .collect();

    Ok(Json(instruments))
}

#[axum::debug_handler]
pub async fn list_locations(
    State(state): State<Arc<ApiState>>,
    _principal: Principal,
) -> Result<Json<Vec<Location>>, AppError> {
    let locations = rosteria_db::repositories::location::list(&state.db_pool)
        .await
        .map_err(RosterError::Database)?
        .into_iter()
        .map(|l| Location {
            id: l.id,
            name: l.name,
            address: l.address,
        })
        .collect();

    Ok(Json(locations))
}
