//! Roster authoring buffer used while an administrator builds or edits a
//! schedule. Rows start empty and are filled in field by field; submit
//! turns the draft into complete [`AssignmentInput`] pairs or fails with
//! a validation error.

use std::collections::HashSet;
use uuid::Uuid;

use crate::errors::{RosterError, RosterResult};
use crate::models::schedule::{AssignmentInput, AssignmentStatus};

/// An assignment row ready for persistence when a roster is created or
/// replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSeed {
    pub musician_id: Uuid,
    pub instrument_id: Uuid,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
}

/// Turns submitted roster pairs into the rows a save persists. Every
/// row starts over as pending with no notes, including on edit: the
/// roster a musician responded to may have changed underneath them, so
/// prior responses are reset.
pub fn seed_assignments(assignments: &[AssignmentInput]) -> Vec<AssignmentSeed> {
    assignments
        .iter()
        .map(|assignment| AssignmentSeed {
            musician_id: assignment.musician_id,
            instrument_id: assignment.instrument_id,
            status: AssignmentStatus::Pending,
            notes: None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterRow {
    pub musician_id: Option<Uuid>,
    pub instrument_id: Option<Uuid>,
}

impl RosterRow {
    pub fn is_complete(&self) -> bool {
        self.musician_id.is_some() && self.instrument_id.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RosterDraft {
    rows: Vec<RosterRow>,
}

impl RosterDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a draft from previously persisted assignments, e.g. when an
    /// administrator opens an existing schedule for editing.
    pub fn from_assignments(assignments: &[AssignmentInput]) -> Self {
        Self {
            rows: assignments
                .iter()
                .map(|assignment| RosterRow {
                    musician_id: Some(assignment.musician_id),
                    instrument_id: Some(assignment.instrument_id),
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add_row(&mut self) {
        self.rows.push(RosterRow::default());
    }

    pub fn remove_row(&mut self, index: usize) -> RosterResult<()> {
        if index >= self.rows.len() {
            return Err(RosterError::Validation(format!(
                "No roster row at index {}",
                index
            )));
        }
        self.rows.remove(index);
        Ok(())
    }

    pub fn set_musician(&mut self, index: usize, musician_id: Uuid) -> RosterResult<()> {
        let row = self.row_mut(index)?;
        row.musician_id = Some(musician_id);
        Ok(())
    }

    pub fn set_instrument(&mut self, index: usize, instrument_id: Uuid) -> RosterResult<()> {
        let row = self.row_mut(index)?;
        row.instrument_id = Some(instrument_id);
        Ok(())
    }

    /// Drops rows whose chosen musician fell out of the eligible set after
    /// a date change. Rows with no musician chosen yet are kept.
    pub fn prune_ineligible(&mut self, eligible_ids: &HashSet<Uuid>) {
        self.rows.retain(|row| match row.musician_id {
            Some(id) => eligible_ids.contains(&id),
            None => true,
        });
    }

    /// Submit-time validation: the roster must be non-empty and every row
    /// fully filled in.
    pub fn finish(&self) -> RosterResult<Vec<AssignmentInput>> {
        if self.rows.is_empty() {
            return Err(RosterError::Validation(
                "A schedule needs at least one musician".to_string(),
            ));
        }

        self.rows
            .iter()
            .map(|row| match (row.musician_id, row.instrument_id) {
                (Some(musician_id), Some(instrument_id)) => Ok(AssignmentInput {
                    musician_id,
                    instrument_id,
                }),
                _ => Err(RosterError::Validation(
                    "Every roster row needs a musician and an instrument".to_string(),
                )),
            })
            .collect()
    }

    fn row_mut(&mut self, index: usize) -> RosterResult<&mut RosterRow> {
        let len = self.rows.len();
        self.rows.get_mut(index).ok_or_else(|| {
            RosterError::Validation(format!("No roster row at index {} (len {})", index, len))
        })
    }
}
