use axum::http::StatusCode;
use medsched_core::models::schedule::{DayOfWeek, WeeklyTemplate};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{
    TestContext, as_owner, day_path, schedule_path, slot_path, slots_path, with_caller,
};

async fn seed_monday(ctx: &TestContext, subject_id: Uuid) -> WeeklyTemplate {
    let response = as_owner(ctx.server.put(&day_path(subject_id, "monday")), subject_id)
        .json(&json!({
            "slots": [
                { "start_time": "09:00", "end_time": "09:30" },
                { "start_time": "09:30", "end_time": "10:00" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::OK);
    response.json::<WeeklyTemplate>()
}

#[test_log::test(tokio::test)]
async fn test_upsert_day_creates_template() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let template = seed_monday(&ctx, subject_id).await;

    assert_eq!(template.subject_id, subject_id);
    assert_eq!(u16::from(template.appointment_duration), 30);
    let monday = template.day(DayOfWeek::Monday).expect("monday present");
    assert_eq!(monday.time_slots.len(), 2);
    assert!(monday.time_slots.iter().all(|slot| slot.is_available));
    assert_eq!(ctx.store.template_count().unwrap(), 1);
}

#[tokio::test]
async fn test_upsert_day_replaces_existing_slots() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let response = as_owner(ctx.server.put(&day_path(subject_id, "Monday")), subject_id)
        .json(&json!({ "slots": [{ "start_time": "14:00", "end_time": "15:00" }] }))
        .await;

    response.assert_status(StatusCode::OK);
    let template = response.json::<WeeklyTemplate>();
    let monday = template.day(DayOfWeek::Monday).unwrap();
    assert_eq!(monday.time_slots.len(), 1);
    assert_eq!(monday.time_slots[0].start_time.to_string(), "14:00");
}

#[tokio::test]
async fn test_upsert_day_rejects_invalid_slot_without_writing() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = as_owner(ctx.server.put(&day_path(subject_id, "tuesday")), subject_id)
        .json(&json!({
            "slots": [
                { "start_time": "09:00", "end_time": "09:30" },
                { "start_time": "11:00", "end_time": "10:00" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.template_count().unwrap(), 0);
}

#[tokio::test]
async fn test_get_template() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let response = ctx.server.get(&schedule_path(subject_id)).await;

    response.assert_status(StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["subject_id"], json!(subject_id.to_string()));
    assert_eq!(body["appointment_duration"], json!(30));
    assert_eq!(body["days"][0]["day_of_week"], json!("Monday"));
    assert_eq!(body["days"][0]["time_slots"][1]["start_time"], json!("09:30"));
}

#[tokio::test]
async fn test_get_missing_template_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx.server.get(&schedule_path(Uuid::new_v4())).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_add_slot_without_template_is_not_found() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = as_owner(ctx.server.post(&slots_path(subject_id, "friday")), subject_id)
        .json(&json!({ "start_time": "08:00", "end_time": "08:30" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(ctx.store.template_count().unwrap(), 0);
}

#[tokio::test]
async fn test_add_slot_creates_missing_day() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let response = as_owner(ctx.server.post(&slots_path(subject_id, "friday")), subject_id)
        .json(&json!({ "start_time": "08:00", "end_time": "08:30", "is_available": false }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let template = response.json::<WeeklyTemplate>();
    let friday = template.day(DayOfWeek::Friday).expect("friday created");
    assert_eq!(friday.time_slots.len(), 1);
    assert!(!friday.time_slots[0].is_available);
    assert_eq!(template.day(DayOfWeek::Monday).unwrap().time_slots.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_add_update_delete_slot() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let added = as_owner(ctx.server.post(&slots_path(subject_id, "monday")), subject_id)
        .json(&json!({ "start_time": "10:00", "end_time": "10:30" }))
        .await
        .json::<WeeklyTemplate>();
    let slot = added
        .day(DayOfWeek::Monday)
        .unwrap()
        .time_slots
        .iter()
        .find(|slot| slot.start_time.to_string() == "10:00")
        .cloned()
        .expect("new slot present");

    let response = as_owner(
        ctx.server.patch(&slot_path(subject_id, "monday", slot.id)),
        subject_id,
    )
    .json(&json!({ "is_available": false }))
    .await;
    response.assert_status(StatusCode::OK);
    let updated = response.json::<WeeklyTemplate>();
    let patched = updated.day(DayOfWeek::Monday).unwrap().slot(slot.id).unwrap();
    assert!(!patched.is_available);
    assert_eq!(patched.start_time, slot.start_time);
    assert_eq!(patched.end_time, slot.end_time);

    let response = as_owner(
        ctx.server.delete(&slot_path(subject_id, "monday", slot.id)),
        subject_id,
    )
    .await;
    response.assert_status(StatusCode::OK);
    let remaining = response.json::<WeeklyTemplate>();
    assert!(remaining.day(DayOfWeek::Monday).unwrap().slot(slot.id).is_none());
    assert_eq!(remaining.day(DayOfWeek::Monday).unwrap().time_slots.len(), 2);
}

#[tokio::test]
async fn test_update_unknown_slot_is_not_found() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let response = as_owner(
        ctx.server.patch(&slot_path(subject_id, "monday", Uuid::new_v4())),
        subject_id,
    )
    .json(&json!({ "is_available": false }))
    .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_slot_on_unconfigured_day_is_not_found() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    let template = seed_monday(&ctx, subject_id).await;
    let slot_id = template.day(DayOfWeek::Monday).unwrap().time_slots[0].id;

    let response = as_owner(
        ctx.server.delete(&slot_path(subject_id, "sunday", slot_id)),
        subject_id,
    )
    .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_slot_rejects_malformed_time() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    let template = seed_monday(&ctx, subject_id).await;
    let slot_id = template.day(DayOfWeek::Monday).unwrap().time_slots[0].id;

    let response = as_owner(
        ctx.server.patch(&slot_path(subject_id, "monday", slot_id)),
        subject_id,
    )
    .json(&json!({ "start_time": "9:00" }))
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_slot_rejects_inverted_range() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let response = as_owner(ctx.server.post(&slots_path(subject_id, "monday")), subject_id)
        .json(&json!({ "start_time": "12:00", "end_time": "12:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_day_in_path_is_rejected() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = as_owner(ctx.server.put(&day_path(subject_id, "funday")), subject_id)
        .json(&json!({ "slots": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let message = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(message.contains("Unknown day of week 'funday'"), "{}", message);
    assert_eq!(ctx.store.template_count().unwrap(), 0);
}

#[rstest]
#[case("MONDAY")]
#[case("MonDay")]
#[tokio::test]
async fn test_day_path_is_case_insensitive(#[case] day: &str) {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = as_owner(ctx.server.put(&day_path(subject_id, day)), subject_id)
        .json(&json!({ "slots": [{ "start_time": "08:00", "end_time": "08:30" }] }))
        .await;

    response.assert_status(StatusCode::OK);
    let template = response.json::<WeeklyTemplate>();
    assert_eq!(template.day(DayOfWeek::Monday).unwrap().time_slots.len(), 1);
}

#[tokio::test]
async fn test_malformed_slot_id_has_json_error_body() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let response = as_owner(
        ctx.server
            .delete(&format!("{}/slots/not-a-uuid", day_path(subject_id, "monday"))),
        subject_id,
    )
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_malformed_body_has_json_error_body() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = as_owner(ctx.server.put(&day_path(subject_id, "monday")), subject_id)
        .json(&json!({ "slots": "09:00-09:30" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
    assert_eq!(ctx.store.template_count().unwrap(), 0);
}

#[tokio::test]
async fn test_set_appointment_duration() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = as_owner(
        ctx.server.put(&format!("{}/duration", schedule_path(subject_id))),
        subject_id,
    )
    .json(&json!({ "appointment_duration": 45 }))
    .await;

    response.assert_status(StatusCode::OK);
    let template = response.json::<WeeklyTemplate>();
    assert_eq!(u16::from(template.appointment_duration), 45);
    assert!(template.days.is_empty());
}

#[tokio::test]
async fn test_set_unsupported_duration_is_rejected() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = as_owner(
        ctx.server.put(&format!("{}/duration", schedule_path(subject_id))),
        subject_id,
    )
    .json(&json!({ "appointment_duration": 20 }))
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.template_count().unwrap(), 0);
}

#[tokio::test]
async fn test_delete_template() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let response = as_owner(ctx.server.delete(&schedule_path(subject_id)), subject_id).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(ctx.store.template_count().unwrap(), 0);

    let response = as_owner(ctx.server.delete(&schedule_path(subject_id)), subject_id).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mutation_without_identity_is_unauthorized() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = ctx
        .server
        .put(&day_path(subject_id, "monday"))
        .json(&json!({ "slots": [] }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.store.template_count().unwrap(), 0);
}

#[tokio::test]
async fn test_mutation_with_unknown_role_is_unauthorized() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = with_caller(ctx.server.put(&day_path(subject_id, "monday")), subject_id, "nurse")
        .json(&json!({ "slots": [] }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_other_doctor_is_forbidden() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();
    seed_monday(&ctx, subject_id).await;

    let response = with_caller(ctx.server.delete(&schedule_path(subject_id)), Uuid::new_v4(), "doctor")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(ctx.store.template_count().unwrap(), 1);
}

#[tokio::test]
async fn test_patient_is_forbidden_on_own_id() {
    let ctx = TestContext::new();
    let subject_id = Uuid::new_v4();

    let response = with_caller(ctx.server.put(&day_path(subject_id, "monday")), subject_id, "patient")
        .json(&json!({ "slots": [] }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
