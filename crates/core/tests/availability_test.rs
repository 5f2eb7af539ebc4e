use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashSet;
use uuid::Uuid;

use rosteria_core::availability::{eligible_musicians, prune_ineligible, unavailable_ids};
use rosteria_core::models::musician::Musician;
use rosteria_core::models::schedule::AssignmentInput;
use rosteria_core::models::unavailability::UnavailabilityPeriod;

fn musician(name: &str, active: bool) -> Musician {
    Musician {
        id: Uuid::new_v4(),
        name: name.to_string(),
        whatsapp: "+5511999990000".to_string(),
        email: format!("{}@example.com", name),
        active,
        account_id: None,
        created_at: Utc::now(),
    }
}

fn period(musician_id: Uuid, start: (i32, u32, u32), end: (i32, u32, u32)) -> UnavailabilityPeriod {
    UnavailabilityPeriod {
        id: Uuid::new_v4(),
        musician_id,
        start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        reason: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_covering_period_excludes_musician() {
    let m = musician("ana", true);
    let periods = vec![period(m.id, (2024, 6, 1), (2024, 6, 5))];

    let eligible = eligible_musicians(vec![m.clone()], &periods, date(2024, 6, 3));
    assert_eq!(eligible.len(), 0);

    let eligible = eligible_musicians(vec![m], &periods, date(2024, 6, 6));
    assert_eq!(eligible.len(), 1);
}

#[rstest]
#[case((2024, 6, 1), false)] // start boundary, inclusive
#[case((2024, 6, 5), false)] // end boundary, inclusive
#[case((2024, 5, 31), true)]
#[case((2024, 6, 6), true)]
fn test_period_boundaries_are_inclusive(#[case] day: (i32, u32, u32), #[case] eligible: bool) {
    let m = musician("bruno", true);
    let periods = vec![period(m.id, (2024, 6, 1), (2024, 6, 5))];

    let result = eligible_musicians(vec![m], &periods, date(day.0, day.1, day.2));
    assert_eq!(!result.is_empty(), eligible);
}

#[test]
fn test_overlapping_periods_exclude_once() {
    let m = musician("carla", true);
    let other = musician("davi", true);
    let periods = vec![
        period(m.id, (2024, 6, 1), (2024, 6, 5)),
        period(m.id, (2024, 6, 3), (2024, 6, 10)),
        period(m.id, (2024, 6, 3), (2024, 6, 3)),
    ];

    let excluded = unavailable_ids(&periods, date(2024, 6, 3));
    assert_eq!(excluded.len(), 1);

    let eligible = eligible_musicians(vec![m, other.clone()], &periods, date(2024, 6, 3));
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].id, other.id);
}

#[test]
fn test_inactive_musicians_are_never_eligible() {
    let inactive = musician("erika", false);
    let active = musician("fabio", true);

    let eligible = eligible_musicians(vec![inactive, active.clone()], &[], date(2024, 6, 3));
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].id, active.id);
}

#[test]
fn test_prune_drops_rows_outside_eligible_set() {
    let keep = Uuid::new_v4();
    let drop = Uuid::new_v4();
    let instrument = Uuid::new_v4();

    let rows = vec![
        AssignmentInput {
            musician_id: keep,
            instrument_id: instrument,
        },
        AssignmentInput {
            musician_id: drop,
            instrument_id: instrument,
        },
    ];

    let eligible: HashSet<Uuid> = [keep].into_iter().collect();
    let pruned = prune_ineligible(rows, &eligible);

    assert_eq!(pruned.len(), 1);
    assert_eq!(pruned[0].musician_id, keep);
}

#[test]
fn test_no_periods_means_everyone_active_is_eligible() {
    let musicians = vec![musician("gabi", true), musician("hugo", true)];
    let eligible = eligible_musicians(musicians.clone(), &[], date(2024, 6, 3));
    assert_eq!(eligible.len(), musicians.len());
}
