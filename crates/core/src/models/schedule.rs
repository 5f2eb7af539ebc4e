use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{RosterError, RosterResult};
use crate::models::reference::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Draft,
    Confirmed,
    Cancelled,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Draft => "draft",
            ScheduleStatus::Confirmed => "confirmed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ScheduleStatus::Draft),
            "confirmed" => Ok(ScheduleStatus::Confirmed),
            "cancelled" => Ok(ScheduleStatus::Cancelled),
            other => Err(RosterError::Validation(format!(
                "Unknown schedule status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Confirmed,
    Declined,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Confirmed => "confirmed",
            AssignmentStatus::Declined => "declined",
        }
    }

    /// Whether the status is one a musician may submit as a response.
    /// `pending` is the initial state only; `respond` never writes it back.
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            AssignmentStatus::Confirmed | AssignmentStatus::Declined
        )
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "confirmed" => Ok(AssignmentStatus::Confirmed),
            "declined" => Ok(AssignmentStatus::Declined),
            other => Err(RosterError::Validation(format!(
                "Unknown assignment status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub location_id: Option<Uuid>,
    pub notes: Option<String>,
    pub status: ScheduleStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotInput {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehearsalInput {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// A completed roster row: which musician plays which instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub musician_id: Uuid,
    pub instrument_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveScheduleRequest {
    pub title: String,
    pub date: NaiveDate,
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub slots: Vec<TimeSlotInput>,
    #[serde(default)]
    pub rehearsals: Vec<RehearsalInput>,
    #[serde(default)]
    pub musicians: Vec<AssignmentInput>,
}

impl SaveScheduleRequest {
    /// Submit-time validation: every rehearsal strictly precedes the
    /// schedule date, and the schedule carries at least one time slot and
    /// one musician.
    pub fn validate(&self) -> RosterResult<()> {
        for rehearsal in &self.rehearsals {
            if rehearsal.date >= self.date {
                return Err(RosterError::Validation(
                    "Rehearsals must take place before the schedule date".to_string(),
                ));
            }
        }

        if self.slots.is_empty() {
            return Err(RosterError::Validation(
                "A schedule needs at least one time slot".to_string(),
            ));
        }

        if self.musicians.is_empty() {
            return Err(RosterError::Validation(
                "A schedule needs at least one musician".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub musician_id: Uuid,
    pub musician_name: String,
    pub instrument_id: Uuid,
    pub instrument_name: String,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetScheduleResponse {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub location: Option<Location>,
    pub notes: Option<String>,
    pub status: ScheduleStatus,
    pub slots: Vec<TimeSlotInput>,
    pub rehearsals: Vec<RehearsalInput>,
    pub musicians: Vec<AssignmentResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub status: ScheduleStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveScheduleResponse {
    pub id: Uuid,
    pub status: ScheduleStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondRequest {
    pub status: AssignmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNotesRequest {
    pub notes: String,
}
