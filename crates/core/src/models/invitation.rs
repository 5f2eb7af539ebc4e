use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{RosterError, RosterResult};

/// Invitations are valid for a week from issuance.
pub const INVITATION_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "expired" => Ok(InvitationStatus::Expired),
            other => Err(RosterError::Validation(format!(
                "Unknown invitation status: {}",
                other
            ))),
        }
    }
}

/// Result of checking a pending invitation against the clock. `Lapsed`
/// means the caller must persist the `expired` transition before failing;
/// expiry is lazy, there is no background sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Valid,
    Lapsed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub status: InvitationStatus,
    pub invited_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Verification decision for a token lookup. Accepted and expired are
    /// terminal: an accepted invitation reads as an invalid token, while
    /// one already transitioned to expired keeps reporting expiry on every
    /// later verify without being rewritten.
    pub fn verify_at(&self, now: DateTime<Utc>) -> RosterResult<VerifyOutcome> {
        match self.status {
            InvitationStatus::Expired => Err(RosterError::Expired(
                "Invitation has expired".to_string(),
            )),
            InvitationStatus::Accepted => Err(RosterError::NotFound(
                "Invitation token is not valid".to_string(),
            )),
            InvitationStatus::Pending => {
                if self.is_expired_at(now) {
                    Ok(VerifyOutcome::Lapsed)
                } else {
                    Ok(VerifyOutcome::Valid)
                }
            }
        }
    }

    pub fn ensure_resendable(&self) -> RosterResult<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(RosterError::Validation(format!(
                "Cannot resend an invitation with status {}",
                self.status
            )))
        }
    }
}

pub fn expiry_from(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::days(INVITATION_TTL_DAYS)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueInvitationRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptInvitationRequest {
    pub name: String,
    pub whatsapp: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationSummary {
    pub id: Uuid,
    pub email: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueInvitationResponse {
    pub id: Uuid,
    pub email: String,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    /// Where the invitee lands: `<origin>/accept-invite?token=<token>`.
    pub accept_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptInvitationResponse {
    pub account_id: Uuid,
    pub musician_id: Uuid,
}
