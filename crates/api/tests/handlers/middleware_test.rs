use axum::{body::to_bytes, http::StatusCode};
use medsched_api::middleware::{
    auth::{Caller, Role, ensure_schedule_owner},
    error_handling::map_error,
};
use medsched_core::errors::ScheduleError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use uuid::Uuid;

#[rstest]
#[case(ScheduleError::NotFound("template".to_string()), StatusCode::NOT_FOUND)]
#[case(ScheduleError::Validation("bad time".to_string()), StatusCode::BAD_REQUEST)]
#[case(ScheduleError::Authentication("no header".to_string()), StatusCode::UNAUTHORIZED)]
#[case(ScheduleError::Authorization("not owner".to_string()), StatusCode::FORBIDDEN)]
#[case(ScheduleError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: ScheduleError, #[case] status: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), status);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(ScheduleError::Validation("Start time 10:00 must be before end time 09:00".to_string()));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body["error"],
        "Validation error: Start time 10:00 must be before end time 09:00"
    );
}

#[rstest]
#[case("doctor", Role::Doctor)]
#[case("Patient", Role::Patient)]
#[case(" ADMIN ", Role::Admin)]
fn test_role_parsing(#[case] raw: &str, #[case] role: Role) {
    assert_eq!(raw.parse::<Role>().unwrap(), role);
}

#[test]
fn test_unknown_role_is_authentication_error() {
    assert!(matches!(
        "receptionist".parse::<Role>(),
        Err(ScheduleError::Authentication(_))
    ));
}

#[test]
fn test_owner_may_manage_schedule() {
    let subject_id = Uuid::new_v4();
    let caller = Caller {
        subject_id,
        role: Role::Doctor,
    };

    assert!(ensure_schedule_owner(&caller, subject_id).is_ok());
}

#[rstest]
#[case(Role::Doctor, false)]
#[case(Role::Patient, true)]
#[case(Role::Admin, true)]
#[case(Role::Patient, false)]
fn test_non_owner_is_forbidden(#[case] role: Role, #[case] same_id: bool) {
    let subject_id = Uuid::new_v4();
    let caller = Caller {
        subject_id: if same_id { subject_id } else { Uuid::new_v4() },
        role,
    };

    assert!(matches!(
        ensure_schedule_owner(&caller, subject_id),
        Err(ScheduleError::Authorization(_))
    ));
}
