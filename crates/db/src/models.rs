use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Status columns are TEXT in the database and carried as String here;
// the API layer parses them into the core enums at the boundary.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMusician {
    pub id: Uuid,
    pub name: String,
    pub whatsapp: String,
    pub email: String,
    pub active: bool,
    pub account_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUnavailability {
    pub id: Uuid,
    pub musician_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInstrument {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLocation {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub location_id: Option<Uuid>,
    pub notes: Option<String>,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRehearsal {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// Assignment row joined with musician and instrument names, as the
/// schedule detail view consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAssignmentDetail {
    pub musician_id: Uuid,
    pub musician_name: String,
    pub instrument_id: Uuid,
    pub instrument_name: String,
    pub status: String,
    pub notes: Option<String>,
}

/// One row of assignment history for the dashboard ranking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAssignmentHistory {
    pub musician_name: String,
    pub status: String,
}

/// An assignment joined with its (non-deleted) schedule, for a
/// musician's personal dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMusicianAssignment {
    pub schedule_id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInvitation {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub status: String,
    pub invited_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
