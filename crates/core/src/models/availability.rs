use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::schedule::{ClockTime, DayOfWeek};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableWindow {
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub duration_minutes: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub day_label: String,
    pub language: String,
    pub slots: Vec<AvailableWindow>,
}
