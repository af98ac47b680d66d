//! Storage seams the scheduler reads and writes through.
//!
//! Implementations return `eyre::Result`; the scheduler lifts failures into
//! [`ScheduleError::Database`](crate::errors::ScheduleError::Database).

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{booking::Booking, booking::BookingStatus, schedule::WeeklyTemplate};

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn find_template_by_subject(&self, subject_id: Uuid) -> eyre::Result<Option<WeeklyTemplate>>;

    /// Inserts or replaces the whole template document and returns what was stored.
    async fn save_template(&self, template: &WeeklyTemplate) -> eyre::Result<WeeklyTemplate>;

    /// Returns `false` when the subject had no template.
    async fn delete_template(&self, subject_id: Uuid) -> eyre::Result<bool>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Bookings for `subject_id` dated within `from..=to` whose status is in `statuses`.
    async fn find_bookings(
        &self,
        subject_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        statuses: &[BookingStatus],
    ) -> eyre::Result<Vec<Booking>>;
}
