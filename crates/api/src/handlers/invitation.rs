use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use eyre::Result;
use rosteria_core::{
    errors::RosterError,
    models::invitation::{
        expiry_from, AcceptInvitationRequest, AcceptInvitationResponse, Invitation,
        InvitationStatus, InvitationSummary, IssueInvitationRequest, IssueInvitationResponse,
        VerifyOutcome,
    },
};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth, auth::Principal, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

fn invitation_from_row(row: rosteria_db::models::DbInvitation) -> Result<Invitation, AppError> {
    Ok(Invitation {
        id: row.id,
        email: row.email,
        token: row.token,
        status: InvitationStatus::from_str(&row.status).map_err(AppError)?,
        invited_by: row.invited_by,
        created_at: row.created_at,
        expires_at: row.expires_at,
    })
}

fn accept_url(public_origin: &str, token: &str) -> String {
    format!("{}/accept-invite?token={}", public_origin, token)
}

/// Persists the lazy pending -> expired transition and fails the
/// request. There is no background sweep; a lapsed invitation is
/// expired the first time anyone touches it.
async fn expire_lapsed(state: &ApiState, invitation: &Invitation) -> AppError {
    if let Err(e) = rosteria_db::repositories::invitation::set_status(
        &state.db_pool,
        invitation.id,
        InvitationStatus::Expired.as_str(),
    )
    .await
    {
        return AppError(RosterError::Database(e));
    }

    AppError(RosterError::Expired("Invitation has expired".to_string()))
}

/// Issues an invitation and asks the mail service to deliver it.
///
/// The invitation is persisted before the mail call, and a mail failure
/// does not roll it back: the admin can resend once the mail service
/// recovers.
#[axum::debug_handler]
pub async fn issue_invitation(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Json(payload): Json<IssueInvitationRequest>,
) -> Result<Json<IssueInvitationResponse>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError(RosterError::Validation(
            "A valid email address is required".to_string(),
        )));
    }

    // One identity per email: neither an existing account nor a second
    // pending invitation is allowed
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

    if rosteria_db::repositories::invitation::find_pending_by_email(&state.db_pool, &email)
        .await
        .map_err(RosterError::Database)?
        .is_some()
    {
        return Err(AppError(RosterError::Duplicate(format!(
            "A pending invitation already exists for {}",
            email
        ))));
    }

    let token = auth::generate_token();
    let expires_at = expiry_from(Utc::now());

    let db_invitation = rosteria_db::repositories::invitation::create(
        &state.db_pool,
        &email,
        &token,
        principal.account_id,
        expires_at,
    )
    .await
    .map_err(RosterError::Database)?;

    state.mailer.send(db_invitation.id).await.map_err(AppError)?;

    let invitation = invitation_from_row(db_invitation)?;

    Ok(Json(IssueInvitationResponse {
        id: invitation.id,
        email: invitation.email,
        status: invitation.status,
        expires_at: invitation.expires_at,
        accept_url: accept_url(&state.public_origin, &token),
    }))
}

#[axum::debug_handler]
pub async fn list_invitations(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
) -> Result<Json<Vec<InvitationSummary>>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let rows = rosteria_db::repositories::invitation::list(&state.db_pool)
        .await
        .map_err(RosterError::Database)?;

    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        let invitation = invitation_from_row(row)?;
        summaries.push(InvitationSummary {
            id: invitation.id,
            email: invitation.email,
            status: invitation.status,
            created_at: invitation.created_at,
            expires_at: invitation.expires_at,
        });
    }

    Ok(Json(summaries))
}

/// Re-sends the invitation email. Only a pending, unexpired invitation
/// can be resent; a lapsed one is expired on the spot instead.
#[axum::debug_handler]
pub async fn resend_invitation(
    State(state): State<Arc<ApiState>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    principal.require_admin().map_err(AppError)?;

    let row = rosteria_db::repositories::invitation::find_by_id(&state.db_pool, id)
        .await
        .map_err(RosterError::Database)?
        .ok_or_else(|| RosterError::NotFound(format!("Invitation with ID {} not found", id)))?;

    let invitation = invitation_from_row(row)?;
    invitation.ensure_resendable().map_err(AppError)?;

    if invitation.is_expired_at(Utc::now()) {
        return Err(expire_lapsed(&state, &invitation).await);
    }

    state.mailer.send(invitation.id).await.map_err(AppError)?;

    Ok(Json(serde_json::json!({ "sent": true })))
}

/// Token check for the invitee's landing page. Unauthenticated: the
/// invitee has no session yet.
#[axum::debug_handler]
pub async fn verify_invitation(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<InvitationSummary>, AppError> {
    let row = rosteria_db::repositories::invitation::find_by_token(&state.db_pool, &query.token)
        .await
        .map_err(RosterError::Database)?
        .ok_or_else(|| RosterError::NotFound("Invitation token is not valid".to_string()))?;

    let invitation = invitation_from_row(row)?;

    match invitation.verify_at(Utc::now()).map_err(AppError)? {
        VerifyOutcome::Lapsed => Err(expire_lapsed(&state, &invitation).await),
        VerifyOutcome::Valid => Ok(Json(InvitationSummary {
            id: invitation.id,
            email: invitation.email,
            status: invitation.status,
            created_at: invitation.created_at,
            expires_at: invitation.expires_at,
        })),
    }
}

/// Redeems an invitation: provisions the account, creates the musician
/// profile, and marks the invitation accepted in one transaction.
#[axum::debug_handler]
pub async fn accept_invitation(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TokenQuery>,
    Json(payload): Json<AcceptInvitationRequest>,
) -> Result<Json<AcceptInvitationResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(RosterError::Validation(
            "Name must not be empty".to_string(),
        )));
    }
    if payload.password.is_empty() {
        return Err(AppError(RosterError::Validation(
            "Password must not be empty".to_string(),
        )));
    }

    let row = rosteria_db::repositories::invitation::find_by_token(&state.db_pool, &query.token)
        .await
        .map_err(RosterError::Database)?
        .ok_or_else(|| RosterError::NotFound("Invitation token is not valid".to_string()))?;

    let invitation = invitation_from_row(row)?;

    if let VerifyOutcome::Lapsed = invitation.verify_at(Utc::now()).map_err(AppError)? {
        return Err(expire_lapsed(&state, &invitation).await);
    }

    // The invitation may have been issued before the invitee's account
    // was created some other way
    if rosteria_db::repositories::account::find_by_email(&state.db_pool, &invitation.email)
        .await
        .map_err(RosterError::Database)?
        .is_some()
    {
        return Err(AppError(RosterError::Duplicate(format!(
            "An account already exists for {}",
            invitation.email
        ))));
    }

    let password_hash = auth::hash_password(&payload.password).map_err(RosterError::Database)?;

    let (account, musician) = rosteria_db::repositories::invitation::accept(
        &state.db_pool,
        invitation.id,
        &invitation.email,
        &password_hash,
        &payload.name,
        &payload.whatsapp,
    )
    .await
    .map_err(RosterError::Database)?;

    Ok(Json(AcceptInvitationResponse {
        account_id: account.id,
        musician_id: musician.id,
    }))
}
