//! PostgreSQL-backed implementations of the core store traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use medsched_core::{
    models::{
        booking::{Booking, BookingStatus},
        schedule::WeeklyTemplate,
    },
    store::{BookingStore, TemplateStore},
};
use uuid::Uuid;

use crate::{DbPool, repositories};

#[derive(Clone)]
pub struct PgTemplateStore {
    pool: DbPool,
}

impl PgTemplateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn find_template_by_subject(&self, subject_id: Uuid) -> Result<Option<WeeklyTemplate>> {
        repositories::template::get_template_by_subject(&self.pool, subject_id)
            .await?
            .map(WeeklyTemplate::try_from)
            .transpose()
    }

    async fn save_template(&self, template: &WeeklyTemplate) -> Result<WeeklyTemplate> {
        let row = repositories::template::upsert_template(
            &self.pool,
            template.subject_id,
            i32::from(template.appointment_duration.minutes()),
            &template.day_list(),
        )
        .await?;

        WeeklyTemplate::try_from(row)
    }

    async fn delete_template(&self, subject_id: Uuid) -> Result<bool> {
        repositories::template::delete_template(&self.pool, subject_id).await
    }
}

#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn find_bookings(
        &self,
        subject_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        statuses: &[BookingStatus],
    ) -> Result<Vec<Booking>> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        repositories::booking::get_bookings_for_subject(&self.pool, subject_id, from, to, &statuses)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }
}
