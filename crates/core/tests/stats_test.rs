use pretty_assertions::assert_eq;
use rstest::rstest;

use rosteria_core::models::schedule::AssignmentStatus;
use rosteria_core::stats::{
    personal_summary, rank_top_musicians, ParticipationRecord, ResponseTally,
};

fn record(name: &str, status: AssignmentStatus) -> ParticipationRecord {
    ParticipationRecord {
        musician_name: name.to_string(),
        status,
    }
}

#[test]
fn test_participation_rate_is_zero_without_assignments() {
    let stats = personal_summary(std::iter::empty());
    assert_eq!(stats.total, 0);
    assert_eq!(stats.participation_rate, 0.0);
}

#[rstest]
#[case(vec![AssignmentStatus::Confirmed], 100.0)]
#[case(vec![AssignmentStatus::Confirmed, AssignmentStatus::Declined], 50.0)]
#[case(
    vec![AssignmentStatus::Confirmed, AssignmentStatus::Pending, AssignmentStatus::Pending, AssignmentStatus::Declined],
    25.0
)]
#[case(vec![AssignmentStatus::Declined, AssignmentStatus::Pending], 0.0)]
fn test_participation_rate(#[case] statuses: Vec<AssignmentStatus>, #[case] expected: f64) {
    let stats = personal_summary(statuses);
    assert_eq!(stats.participation_rate, expected);
    assert!((0.0..=100.0).contains(&stats.participation_rate));
}

#[test]
fn test_personal_summary_counts_by_status() {
    let stats = personal_summary(vec![
        AssignmentStatus::Confirmed,
        AssignmentStatus::Confirmed,
        AssignmentStatus::Declined,
        AssignmentStatus::Pending,
    ]);

    assert_eq!(stats.total, 4);
    assert_eq!(stats.confirmed, 2);
    assert_eq!(stats.declined, 1);
    assert_eq!(stats.pending, 1);
}

#[test]
fn test_response_tally_from_iterator() {
    let tally: ResponseTally = vec![
        AssignmentStatus::Pending,
        AssignmentStatus::Confirmed,
        AssignmentStatus::Pending,
    ]
    .into_iter()
    .collect();

    assert_eq!(tally.pending, 2);
    assert_eq!(tally.confirmed, 1);
    assert_eq!(tally.declined, 0);
    assert_eq!(tally.total(), 3);
}

#[test]
fn test_ranking_orders_by_confirmation_ratio() {
    let records = vec![
        // half rate
        record("ana", AssignmentStatus::Confirmed),
        record("ana", AssignmentStatus::Declined),
        // full rate
        record("bruno", AssignmentStatus::Confirmed),
        // zero rate
        record("carla", AssignmentStatus::Pending),
    ];

    let ranking = rank_top_musicians(&records, 5);
    let names: Vec<&str> = ranking.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["bruno", "ana", "carla"]);

    assert_eq!(ranking[1].confirmed, 1);
    assert_eq!(ranking[1].total, 2);
}

#[test]
fn test_ranking_ties_keep_input_order() {
    let records = vec![
        record("ana", AssignmentStatus::Confirmed),
        record("bruno", AssignmentStatus::Confirmed),
        record("carla", AssignmentStatus::Confirmed),
    ];

    let ranking = rank_top_musicians(&records, 5);
    let names: Vec<&str> = ranking.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["ana", "bruno", "carla"]);
}

#[test]
fn test_ranking_truncates_to_limit() {
    let records: Vec<ParticipationRecord> = (0..8)
        .map(|i| record(&format!("musician-{}", i), AssignmentStatus::Confirmed))
        .collect();

    let ranking = rank_top_musicians(&records, 5);
    assert_eq!(ranking.len(), 5);
}

#[test]
fn test_ranking_groups_repeat_rows() {
    let records = vec![
        record("ana", AssignmentStatus::Confirmed),
        record("ana", AssignmentStatus::Confirmed),
        record("ana", AssignmentStatus::Declined),
    ];

    let ranking = rank_top_musicians(&records, 5);
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].confirmed, 2);
    assert_eq!(ranking[0].total, 3);
}
