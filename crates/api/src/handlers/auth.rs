use axum::{extract::State, Json};
use eyre::Result;
use rosteria_core::{
    errors::RosterError,
    models::musician::{
        ChangePasswordRequest, CurrentUserResponse, SignInRequest, SignInResponse, SignUpRequest,
    },
};
use std::sync::Arc;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Exchanges email + password for an opaque session token.
#[axum::debug_handler]
pub async fn sign_in(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    // Look up the account; a missing account and a wrong password fail
    // with the same message
    let account = rosteria_db::repositories::account::find_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(RosterError::Database)?
        .ok_or_else(|| RosterError::Authentication("Invalid email or password".to_string()))?;

    let valid = auth::verify_password(&payload.password, &account.password_hash)
        .map_err(RosterError::Database)?;
    if !valid {
        return Err(AppError(RosterError::Authentication(
            "Invalid email or password".to_string(),
        )));
    }

    // Issue a fresh session token
    let token = auth::generate_token();
    rosteria_db::repositories::account::create_session(&state.db_pool, account.id, &token)
        .await
        .map_err(RosterError::Database)?;

    Ok(Json(SignInResponse {
        token,
        account_id: account.id,
        is_admin: account.is_admin,
    }))
}

/// Open self-service registration: provisions an account plus an active
/// musician profile in one transaction and signs the caller in. This is
/// also how a fresh deployment mints its first account; promotion to
/// administrator is an operational step on the accounts table.
#[axum::debug_handler]
pub async fn sign_up(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SignUpRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    payload.validate().map_err(AppError)?;

    let email = payload.email.trim().to_lowercase();

    if rosteria_db::repositories::account::find_by_email(&state.db_pool, &email)
        .await
        .map_err(RosterError::Database)?
        .is_some()
    {
        return Err(AppError(RosterError::Duplicate(format!(
            "An account already exists for {}",
            email
        ))));
    }

    let password_hash = auth::hash_password(&payload.password).map_err(RosterError::Database)?;

    let (account, _musician) = rosteria_db::repositories::account::create_with_musician(
        &state.db_pool,
        &email,
        &password_hash,
        &payload.name,
        &payload.whatsapp,
    )
    .await
    .map_err(RosterError::Database)?;

    let token = auth::generate_token();
    rosteria_db::repositories::account::create_session(&state.db_pool, account.id, &token)
        .await
        .map_err(RosterError::Database)?;

    Ok(Json(SignInResponse {
        token,
        account_id: account.id,
        is_admin: account.is_admin,
    }))
}

/// Returns who the session token belongs to, including the linked
/// musician profile when one exists (administrators may not have one).
#[axum::debug_handler]
pub async fn current_user(
    State(state): State<Arc<ApiState>>,
    principal: auth::Principal,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let musician =
        rosteria_db::repositories::musician::find_by_account(&state.db_pool, principal.account_id)
            .await
            .map_err(RosterError::Database)?;

    Ok(Json(CurrentUserResponse {
        account_id: principal.account_id,
        is_admin: principal.is_admin,
        musician_id: musician.map(|m| m.id),
    }))
}

/// Replaces the caller's password with a fresh Argon2 hash.
#[axum::debug_handler]
pub async fn change_password(
    State(state): State<Arc<ApiState>>,
    principal: auth::Principal,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.new_password.is_empty() {
        return Err(AppError(RosterError::Validation(
            "Password must not be empty".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.new_password).map_err(RosterError::Database)?;

    rosteria_db::repositories::account::update_password(
        &state.db_pool,
        principal.account_id,
        &password_hash,
    )
    .await
    .map_err(RosterError::Database)?;

    Ok(Json(serde_json::json!({ "updated": true })))
}
