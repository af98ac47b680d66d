use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{Result, WrapErr, eyre};
use medsched_core::models::{
    booking::{Booking, BookingStatus},
    schedule::{AppointmentDuration, DaySchedule, WeeklyTemplate},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// Row of `weekly_templates`. Days and their slots are kept as one JSONB
/// document so a template is always written in a single statement.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWeeklyTemplate {
    pub subject_id: Uuid,
    pub appointment_duration: i32,
    pub days: Json<Vec<DaySchedule>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbWeeklyTemplate> for WeeklyTemplate {
    type Error = eyre::Report;

    fn try_from(row: DbWeeklyTemplate) -> Result<Self> {
        let minutes = u16::try_from(row.appointment_duration)
            .map_err(|_| eyre!("Negative appointment duration for subject {}", row.subject_id))?;
        let duration = AppointmentDuration::try_from(minutes)
            .wrap_err_with(|| format!("Corrupt template for subject {}", row.subject_id))?;

        WeeklyTemplate::from_parts(
            row.subject_id,
            duration,
            row.days.0,
            row.created_at,
            row.updated_at,
        )
        .wrap_err_with(|| format!("Corrupt template for subject {}", row.subject_id))
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> Result<Self> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .wrap_err_with(|| format!("Corrupt booking {}", row.id))?;

        Ok(Booking {
            id: row.id,
            subject_id: row.subject_id,
            date: row.date,
            start_time: row.start_time.into(),
            status,
            created_at: row.created_at,
        })
    }
}
