use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use std::str::FromStr;
use uuid::Uuid;

use rosteria_core::errors::RosterError;
use rosteria_core::models::schedule::{
    AssignmentInput, AssignmentStatus, RehearsalInput, SaveScheduleRequest, ScheduleStatus,
    TimeSlotInput,
};
use rosteria_core::models::musician::SignUpRequest;
use rosteria_core::models::unavailability::CreateUnavailabilityRequest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn valid_request() -> SaveScheduleRequest {
    SaveScheduleRequest {
        title: "Sunday service".to_string(),
        date: date(2024, 6, 9),
        location_id: None,
        notes: None,
        slots: vec![TimeSlotInput {
            start_time: time(9, 0),
            end_time: time(11, 0),
        }],
        rehearsals: vec![],
        musicians: vec![AssignmentInput {
            musician_id: Uuid::new_v4(),
            instrument_id: Uuid::new_v4(),
        }],
    }
}

#[test]
fn test_valid_schedule_passes() {
    assert!(valid_request().validate().is_ok());
}

#[rstest]
#[case((2024, 6, 8), true)] // day before: ok
#[case((2024, 6, 9), false)] // same day: rejected
#[case((2024, 6, 10), false)] // after: rejected
fn test_rehearsal_must_strictly_precede_schedule_date(
    #[case] rehearsal_day: (i32, u32, u32),
    #[case] ok: bool,
) {
    let mut request = valid_request();
    request.rehearsals.push(RehearsalInput {
        date: date(rehearsal_day.0, rehearsal_day.1, rehearsal_day.2),
        start_time: time(19, 30),
    });

    assert_eq!(request.validate().is_ok(), ok);
}

#[test]
fn test_schedule_without_slots_is_incomplete() {
    let mut request = valid_request();
    request.slots.clear();
    assert!(matches!(
        request.validate(),
        Err(RosterError::Validation(_))
    ));
}

#[test]
fn test_schedule_without_musicians_is_incomplete() {
    let mut request = valid_request();
    request.musicians.clear();
    assert!(matches!(
        request.validate(),
        Err(RosterError::Validation(_))
    ));
}

#[test]
fn test_unavailability_range_ordering() {
    let ok = CreateUnavailabilityRequest {
        start_date: date(2024, 6, 1),
        end_date: date(2024, 6, 1),
        reason: None,
    };
    assert!(ok.validate().is_ok());

    let inverted = CreateUnavailabilityRequest {
        start_date: date(2024, 6, 5),
        end_date: date(2024, 6, 1),
        reason: Some("trip".to_string()),
    };
    assert!(matches!(
        inverted.validate(),
        Err(RosterError::Validation(_))
    ));
}

fn signup() -> SignUpRequest {
    SignUpRequest {
        name: "Ana".to_string(),
        whatsapp: "+55 11 99999-0000".to_string(),
        email: "ana@example.com".to_string(),
        password: "correct horse".to_string(),
    }
}

#[test]
fn test_valid_signup_passes() {
    assert!(signup().validate().is_ok());
}

#[rstest]
#[case("name", "  ")]
#[case("email", "not-an-address")]
#[case("password", "")]
fn test_signup_rejects_bad_fields(#[case] field: &str, #[case] value: &str) {
    let mut request = signup();
    match field {
        "name" => request.name = value.to_string(),
        "email" => request.email = value.to_string(),
        _ => request.password = value.to_string(),
    }

    assert!(matches!(
        request.validate(),
        Err(RosterError::Validation(_))
    ));
}

#[rstest]
#[case(ScheduleStatus::Draft, "draft")]
#[case(ScheduleStatus::Confirmed, "confirmed")]
#[case(ScheduleStatus::Cancelled, "cancelled")]
fn test_schedule_status_round_trips(#[case] status: ScheduleStatus, #[case] text: &str) {
    assert_eq!(status.as_str(), text);
    assert_eq!(ScheduleStatus::from_str(text).unwrap(), status);
    assert_eq!(to_string(&status).unwrap(), format!("\"{}\"", text));
}

#[rstest]
#[case(AssignmentStatus::Pending, false)]
#[case(AssignmentStatus::Confirmed, true)]
#[case(AssignmentStatus::Declined, true)]
fn test_assignment_status_response_flag(#[case] status: AssignmentStatus, #[case] response: bool) {
    assert_eq!(status.is_response(), response);
}

#[test]
fn test_unknown_status_text_is_rejected() {
    assert!(AssignmentStatus::from_str("maybe").is_err());
    assert!(ScheduleStatus::from_str("archived").is_err());
}

#[test]
fn test_save_schedule_request_serialization() {
    let request = valid_request();
    let json = to_string(&request).expect("Failed to serialize schedule request");
    let deserialized: SaveScheduleRequest =
        from_str(&json).expect("Failed to deserialize schedule request");

    assert_eq!(deserialized.title, request.title);
    assert_eq!(deserialized.date, request.date);
    assert_eq!(deserialized.slots, request.slots);
    assert_eq!(deserialized.musicians, request.musicians);
}

#[test]
fn test_save_schedule_request_defaults_optional_lists() {
    let json = r#"{"title": "Sunday service", "date": "2024-06-09", "location_id": null}"#;
    let request: SaveScheduleRequest = from_str(json).unwrap();

    assert!(request.slots.is_empty());
    assert!(request.rehearsals.is_empty());
    assert!(request.musicians.is_empty());
    assert_eq!(request.notes, None);
}
