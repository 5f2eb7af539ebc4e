use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use rosteria_core::errors::RosterError;
use rosteria_core::models::invitation::{
    expiry_from, Invitation, InvitationStatus, VerifyOutcome, INVITATION_TTL_DAYS,
};

fn invitation(status: InvitationStatus) -> Invitation {
    let created_at = Utc::now();
    Invitation {
        id: Uuid::new_v4(),
        email: "musician@example.com".to_string(),
        token: "a-random-token".to_string(),
        status,
        invited_by: Uuid::new_v4(),
        created_at,
        expires_at: expiry_from(created_at),
    }
}

#[test]
fn test_expiry_is_seven_days_from_issuance() {
    let issued = Utc::now();
    assert_eq!(
        expiry_from(issued) - issued,
        Duration::days(INVITATION_TTL_DAYS)
    );
}

#[test]
fn test_verify_is_idempotent_before_expiry() {
    let invitation = invitation(InvitationStatus::Pending);
    let now = invitation.created_at + Duration::days(3);

    // Repeated verifies of an unexpired token all come back Valid
    // without any state change.
    for _ in 0..3 {
        assert_eq!(invitation.verify_at(now).unwrap(), VerifyOutcome::Valid);
    }
    assert_eq!(invitation.status, InvitationStatus::Pending);
}

#[test]
fn test_verify_after_expiry_is_lapsed() {
    let invitation = invitation(InvitationStatus::Pending);
    let now = invitation.created_at + Duration::days(8);

    assert_eq!(invitation.verify_at(now).unwrap(), VerifyOutcome::Lapsed);
}

#[test]
fn test_verify_at_exact_expiry_instant_is_still_valid() {
    let invitation = invitation(InvitationStatus::Pending);
    assert_eq!(
        invitation.verify_at(invitation.expires_at).unwrap(),
        VerifyOutcome::Valid
    );
}

#[test]
fn test_accepted_invitation_reads_as_invalid_token() {
    let invitation = invitation(InvitationStatus::Accepted);
    let result = invitation.verify_at(Utc::now());
    assert!(matches!(result, Err(RosterError::NotFound(_))));
}

#[test]
fn test_reverify_of_expired_invitation_keeps_reporting_expiry() {
    // Once the lazy pending -> expired transition has been persisted,
    // every later verify reports expiry without rewriting anything.
    let invitation = invitation(InvitationStatus::Expired);

    for _ in 0..3 {
        let result = invitation.verify_at(Utc::now());
        assert!(matches!(result, Err(RosterError::Expired(_))));
    }
    assert_eq!(invitation.status, InvitationStatus::Expired);
}

#[test]
fn test_only_pending_invitations_can_be_resent() {
    assert!(invitation(InvitationStatus::Pending)
        .ensure_resendable()
        .is_ok());

    for status in [InvitationStatus::Accepted, InvitationStatus::Expired] {
        assert!(matches!(
            invitation(status).ensure_resendable(),
            Err(RosterError::Validation(_))
        ));
    }
}

#[test]
fn test_status_serializes_lowercase() {
    let json = serde_json::to_string(&InvitationStatus::Pending).unwrap();
    assert_eq!(json, "\"pending\"");

    let parsed: InvitationStatus = serde_json::from_str("\"expired\"").unwrap();
    assert_eq!(parsed, InvitationStatus::Expired);
}
