use pretty_assertions::assert_eq;
use std::collections::HashSet;
use uuid::Uuid;

use rosteria_core::errors::RosterError;
use rosteria_core::models::schedule::{AssignmentInput, AssignmentStatus};
use rosteria_core::roster::{seed_assignments, RosterDraft};

#[test]
fn test_add_set_and_finish() {
    let musician = Uuid::new_v4();
    let instrument = Uuid::new_v4();

    let mut draft = RosterDraft::new();
    draft.add_row();
    draft.set_musician(0, musician).unwrap();
    draft.set_instrument(0, instrument).unwrap();

    let assignments = draft.finish().unwrap();
    assert_eq!(
        assignments,
        vec![AssignmentInput {
            musician_id: musician,
            instrument_id: instrument,
        }]
    );
}

#[test]
fn test_empty_roster_fails_validation() {
    let draft = RosterDraft::new();
    assert!(matches!(draft.finish(), Err(RosterError::Validation(_))));
}

#[test]
fn test_incomplete_row_fails_validation() {
    let mut draft = RosterDraft::new();
    draft.add_row();
    draft.set_musician(0, Uuid::new_v4()).unwrap();

    assert!(matches!(draft.finish(), Err(RosterError::Validation(_))));
}

#[test]
fn test_remove_row() {
    let mut draft = RosterDraft::new();
    draft.add_row();
    draft.add_row();
    draft.remove_row(0).unwrap();
    assert_eq!(draft.rows().len(), 1);

    assert!(matches!(
        draft.remove_row(5),
        Err(RosterError::Validation(_))
    ));
}

#[test]
fn test_out_of_bounds_index_is_rejected() {
    let mut draft = RosterDraft::new();
    assert!(matches!(
        draft.set_musician(0, Uuid::new_v4()),
        Err(RosterError::Validation(_))
    ));
}

#[test]
fn test_prune_keeps_unassigned_rows() {
    let eligible_musician = Uuid::new_v4();
    let ineligible_musician = Uuid::new_v4();

    let mut draft = RosterDraft::new();
    draft.add_row();
    draft.set_musician(0, eligible_musician).unwrap();
    draft.add_row();
    draft.set_musician(1, ineligible_musician).unwrap();
    draft.add_row(); // still empty, musician not chosen yet

    let eligible: HashSet<Uuid> = [eligible_musician].into_iter().collect();
    draft.prune_ineligible(&eligible);

    assert_eq!(draft.rows().len(), 2);
    assert_eq!(draft.rows()[0].musician_id, Some(eligible_musician));
    assert_eq!(draft.rows()[1].musician_id, None);
}

#[test]
fn test_saving_a_roster_resets_every_row_to_pending() {
    let assignments = vec![
        AssignmentInput {
            musician_id: Uuid::new_v4(),
            instrument_id: Uuid::new_v4(),
        },
        AssignmentInput {
            musician_id: Uuid::new_v4(),
            instrument_id: Uuid::new_v4(),
        },
    ];

    // Editing a schedule replaces its roster wholesale, and the rows
    // the save persists carry pending status and empty notes even for
    // musicians who had already responded.
    let seeds = seed_assignments(&assignments);

    assert_eq!(seeds.len(), assignments.len());
    for (seed, input) in seeds.iter().zip(&assignments) {
        assert_eq!(seed.musician_id, input.musician_id);
        assert_eq!(seed.instrument_id, input.instrument_id);
        assert_eq!(seed.status, AssignmentStatus::Pending);
        assert_eq!(seed.notes, None);
    }
}

#[test]
fn test_from_assignments_round_trips() {
    let assignments = vec![
        AssignmentInput {
            musician_id: Uuid::new_v4(),
            instrument_id: Uuid::new_v4(),
        },
        AssignmentInput {
            musician_id: Uuid::new_v4(),
            instrument_id: Uuid::new_v4(),
        },
    ];

    let draft = RosterDraft::from_assignments(&assignments);
    assert_eq!(draft.finish().unwrap(), assignments);
}
