//! # Availability Handlers
//!
//! Public read endpoint that answers "when can I book this doctor on this
//! date?". The work is done by
//! [`WeeklyScheduler::resolve_available_slots`](medsched_core::scheduler::WeeklyScheduler::resolve_available_slots);
//! this module parses the query, picks a response language and labels the
//! weekday.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::ACCEPT_LANGUAGE},
};
use chrono::NaiveDate;
use medsched_core::{
    availability::weekday_of,
    errors::ScheduleError,
    localization::{resolve_localized_field, weekday_labels},
    models::availability::AvailabilityResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    extract::{Path, Query},
    middleware::error_handling::AppError,
};

/// Query parameters for the availability endpoint
///
/// # Fields
///
/// * `date` - Calendar date in `YYYY-MM-DD` form, interpreted without a timezone
/// * `lang` - Optional language for labels; overrides `Accept-Language`
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub lang: Option<String>,
}

/// Lists the bookable windows of a subject on one date
///
/// # Endpoint
///
/// ```text
/// GET /api/subjects/:subject_id/availability?date=2024-06-03&lang=fr
/// ```
///
/// A subject without a template, or without slots on that weekday, gets an
/// empty `slots` list rather than an error.
///
/// # Errors
///
/// * `ScheduleError::Validation` - `date` is not a valid `YYYY-MM-DD` date
/// * `ScheduleError::Database` - a store read failed
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(subject_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
    headers: HeaderMap,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(&query.date)?;

    let slots = state
        .scheduler
        .resolve_available_slots(subject_id, date)
        .await?;

    let requested = query
        .lang
        .as_deref()
        .or_else(|| headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()));
    let language = state.localization.negotiate(requested).to_string();

    let day_of_week = weekday_of(date);
    let labels = weekday_labels(day_of_week);
    let day_label = resolve_localized_field(&labels, &language, &state.localization)
        .unwrap_or(day_of_week.as_str())
        .to_string();

    Ok(Json(AvailabilityResponse {
        subject_id,
        date,
        day_of_week,
        day_label,
        language,
        slots,
    }))
}

fn parse_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ScheduleError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", raw))
    })
}
