use axum::{Json, extract::State, http::StatusCode};
use medsched_core::models::schedule::{
    AppointmentDuration, CreateTimeSlotRequest, DayOfWeek, SetAppointmentDurationRequest,
    UpdateTimeSlotRequest, UpsertDaySlotsRequest, WeeklyTemplate,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    extract::{JsonBody, Path},
    middleware::{
        auth::{Caller, ensure_schedule_owner},
        error_handling::AppError,
    },
};

#[axum::debug_handler]
pub async fn get_template(
    State(state): State<Arc<ApiState>>,
    Path(subject_id): Path<Uuid>,
) -> Result<Json<WeeklyTemplate>, AppError> {
    let template = state.scheduler.get_template(subject_id).await?;
    Ok(Json(template))
}

#[axum::debug_handler]
pub async fn delete_template(
    State(state): State<Arc<ApiState>>,
    caller: Caller,
    Path(subject_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ensure_schedule_owner(&caller, subject_id)?;

    state.scheduler.delete_template(subject_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn set_appointment_duration(
    State(state): State<Arc<ApiState>>,
    caller: Caller,
    Path(subject_id): Path<Uuid>,
    JsonBody(payload): JsonBody<SetAppointmentDurationRequest>,
) -> Result<Json<WeeklyTemplate>, AppError> {
    ensure_schedule_owner(&caller, subject_id)?;

    let duration = AppointmentDuration::try_from(payload.appointment_duration)?;
    let template = state
        .scheduler
        .set_appointment_duration(subject_id, duration)
        .await?;

    Ok(Json(template))
}

#[axum::debug_handler]
pub async fn upsert_day_slots(
    State(state): State<Arc<ApiState>>,
    caller: Caller,
    Path((subject_id, day)): Path<(Uuid, DayOfWeek)>,
    JsonBody(payload): JsonBody<UpsertDaySlotsRequest>,
) -> Result<Json<WeeklyTemplate>, AppError> {
    ensure_schedule_owner(&caller, subject_id)?;

    // Validate every slot before anything is written
    let slots = payload.into_slots()?;
    let template = state
        .scheduler
        .upsert_day_slots(subject_id, day, slots)
        .await?;

    Ok(Json(template))
}

#[axum::debug_handler]
pub async fn add_slot(
    State(state): State<Arc<ApiState>>,
    caller: Caller,
    Path((subject_id, day)): Path<(Uuid, DayOfWeek)>,
    JsonBody(payload): JsonBody<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<WeeklyTemplate>), AppError> {
    ensure_schedule_owner(&caller, subject_id)?;

    let slot = payload.into_slot()?;
    let template = state.scheduler.add_slot(subject_id, day, slot).await?;

    Ok((StatusCode::CREATED, Json(template)))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    caller: Caller,
    Path((subject_id, day, slot_id)): Path<(Uuid, DayOfWeek, Uuid)>,
    JsonBody(payload): JsonBody<UpdateTimeSlotRequest>,
) -> Result<Json<WeeklyTemplate>, AppError> {
    ensure_schedule_owner(&caller, subject_id)?;

    let patch = payload.into_patch()?;
    let template = state
        .scheduler
        .update_slot(subject_id, day, slot_id, patch)
        .await?;

    Ok(Json(template))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    caller: Caller,
    Path((subject_id, day, slot_id)): Path<(Uuid, DayOfWeek, Uuid)>,
) -> Result<Json<WeeklyTemplate>, AppError> {
    ensure_schedule_owner(&caller, subject_id)?;

    let template = state
        .scheduler
        .delete_slot(subject_id, day, slot_id)
        .await?;

    Ok(Json(template))
}
