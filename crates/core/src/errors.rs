use thiserror::Error;
use uuid::Uuid;

use crate::models::schedule::DayOfWeek;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Template, weekday entry or slot does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed time, date, weekday or duration; inverted slot range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller identity is missing or unreadable.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Caller is known but may not touch this schedule.
    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ScheduleError {
    pub fn template_not_found(subject_id: Uuid) -> Self {
        Self::NotFound(format!("Weekly template for subject {} not found", subject_id))
    }

    pub fn day_not_configured(day: DayOfWeek) -> Self {
        Self::NotFound(format!("No schedule configured for {}", day))
    }

    pub fn slot_not_found(day: DayOfWeek, slot_id: Uuid) -> Self {
        Self::NotFound(format!("Time slot {} not found on {}", slot_id, day))
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
