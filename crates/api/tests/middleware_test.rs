use axum::http::StatusCode;
use axum::response::IntoResponse;
use pretty_assertions::assert_eq;
use rosteria_api::middleware::error_handling::AppError;
use rosteria_core::errors::RosterError;
use rstest::rstest;

#[rstest]
#[case(RosterError::NotFound("missing".to_string()), StatusCode::NOT_FOUND)]
#[case(RosterError::Validation("bad input".to_string()), StatusCode::BAD_REQUEST)]
#[case(RosterError::Duplicate("already there".to_string()), StatusCode::CONFLICT)]
#[case(RosterError::Expired("too late".to_string()), StatusCode::GONE)]
#[case(RosterError::Authentication("who are you".to_string()), StatusCode::UNAUTHORIZED)]
#[case(RosterError::Authorization("not yours".to_string()), StatusCode::FORBIDDEN)]
#[case(RosterError::ExternalService("mail is down".to_string()), StatusCode::BAD_GATEWAY)]
fn maps_domain_errors_to_status_codes(#[case] error: RosterError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status_code(), expected);
}

#[test]
fn database_errors_are_internal() {
    let error = AppError(RosterError::Database(eyre::eyre!("connection refused")));
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn response_body_carries_the_message() {
    let response = AppError(RosterError::NotFound("Schedule not found".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Resource not found: Schedule not found");
}

#[tokio::test]
async fn external_service_message_is_surfaced_verbatim() {
    let response = AppError(RosterError::ExternalService(
        "SMTP relay rejected the sender".to_string(),
    ))
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("SMTP relay rejected the sender"));
}
