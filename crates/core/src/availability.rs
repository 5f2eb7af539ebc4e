//! Date-eligibility filtering: which musicians can be placed on a
//! schedule for a given calendar date.
//!
//! A musician is eligible when they are active, not soft-deleted (the
//! repository query already drops tombstoned rows), and have no
//! unavailability period covering the date. Overlapping or duplicate
//! periods exclude a musician once; the exclusion set has set semantics.

use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::musician::Musician;
use crate::models::schedule::AssignmentInput;
use crate::models::unavailability::UnavailabilityPeriod;

/// Collects the ids of musicians with a period covering `date`.
pub fn unavailable_ids(periods: &[UnavailabilityPeriod], date: NaiveDate) -> HashSet<Uuid> {
    periods
        .iter()
        .filter(|period| period.covers(date))
        .map(|period| period.musician_id)
        .collect()
}

/// Filters `candidates` down to the musicians eligible on `date`.
/// Inactive musicians are dropped even if the caller forgot to filter.
pub fn eligible_musicians(
    candidates: Vec<Musician>,
    periods: &[UnavailabilityPeriod],
    date: NaiveDate,
) -> Vec<Musician> {
    let excluded = unavailable_ids(periods, date);

    candidates
        .into_iter()
        .filter(|musician| musician.active && !excluded.contains(&musician.id))
        .collect()
}

/// Drops roster rows whose musician is no longer in the eligible set.
/// Re-run whenever the schedule date changes during authoring; this is
/// the only mutation the availability filter triggers.
pub fn prune_ineligible(
    rows: Vec<AssignmentInput>,
    eligible_ids: &HashSet<Uuid>,
) -> Vec<AssignmentInput> {
    rows.into_iter()
        .filter(|row| eligible_ids.contains(&row.musician_id))
        .collect()
}
