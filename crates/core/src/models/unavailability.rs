use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{RosterError, RosterResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailabilityPeriod {
    pub id: Uuid,
    pub musician_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

impl UnavailabilityPeriod {
    /// Both endpoints are inclusive.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUnavailabilityRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

impl CreateUnavailabilityRequest {
    pub fn validate(&self) -> RosterResult<()> {
        if self.start_date > self.end_date {
            return Err(RosterError::Validation(
                "Unavailability start date must not be after its end date".to_string(),
            ));
        }
        Ok(())
    }
}
