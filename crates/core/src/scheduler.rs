//! # Weekly Scheduler
//!
//! Service layer over the template and booking stores. Every mutation is a
//! single read-modify-write of one template document: load (or start a new
//! template), change it in memory, save the whole document back. Concurrent
//! writers to the same subject resolve as last-write-wins at the store.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::{
    availability,
    errors::{ScheduleError, ScheduleResult},
    models::{
        availability::AvailableWindow,
        booking::BookingStatus,
        schedule::{AppointmentDuration, DayOfWeek, TimeSlot, TimeSlotPatch, WeeklyTemplate},
    },
    store::{BookingStore, TemplateStore},
};

#[derive(Clone)]
pub struct WeeklyScheduler {
    templates: Arc<dyn TemplateStore>,
    bookings: Arc<dyn BookingStore>,
}

impl WeeklyScheduler {
    pub fn new(templates: Arc<dyn TemplateStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { templates, bookings }
    }

    /// # Errors
    ///
    /// * `ScheduleError::NotFound` - the subject has no template
    pub async fn get_template(&self, subject_id: Uuid) -> ScheduleResult<WeeklyTemplate> {
        self.load_existing(subject_id).await
    }

    /// Bookable windows for `subject_id` on `date`.
    ///
    /// Missing template, missing day and empty day all yield an empty list.
    /// The booking store is only consulted when there is at least one slot to
    /// filter, so a call costs at most two reads.
    pub async fn resolve_available_slots(
        &self,
        subject_id: Uuid,
        date: NaiveDate,
    ) -> ScheduleResult<Vec<AvailableWindow>> {
        let Some(template) = self.templates.find_template_by_subject(subject_id).await? else {
            debug!(%subject_id, "No weekly template, nothing available");
            return Ok(Vec::new());
        };

        if !availability::has_slots_on(&template, date) {
            debug!(%subject_id, %date, "No slots configured for weekday");
            return Ok(Vec::new());
        }

        let bookings = self
            .bookings
            .find_bookings(subject_id, date, date, &BookingStatus::OCCUPYING)
            .await?;

        let windows = availability::resolve_available_slots(Some(&template), date, &bookings);
        debug!(
            %subject_id,
            %date,
            booked = bookings.len(),
            available = windows.len(),
            "Resolved availability"
        );
        Ok(windows)
    }

    /// Replaces one day's slots, creating the template and the day as needed.
    pub async fn upsert_day_slots(
        &self,
        subject_id: Uuid,
        day: DayOfWeek,
        slots: Vec<TimeSlot>,
    ) -> ScheduleResult<WeeklyTemplate> {
        let mut template = self.load_or_new(subject_id).await?;
        template.replace_day_slots(day, slots);
        self.save(template).await
    }

    /// Appends a slot to a day. The day entry is created if missing, the
    /// template is not. Identical slots are not de-duplicated.
    ///
    /// # Errors
    ///
    /// * `ScheduleError::NotFound` - the subject has no template
    pub async fn add_slot(
        &self,
        subject_id: Uuid,
        day: DayOfWeek,
        slot: TimeSlot,
    ) -> ScheduleResult<WeeklyTemplate> {
        let mut template = self.load_existing(subject_id).await?;
        let slot_id = template.add_slot(day, slot).id;
        debug!(%subject_id, %day, %slot_id, "Adding time slot");
        self.save(template).await
    }

    /// Merges `patch` into one slot.
    ///
    /// # Errors
    ///
    /// * `ScheduleError::NotFound` - template, day or slot does not exist
    pub async fn update_slot(
        &self,
        subject_id: Uuid,
        day: DayOfWeek,
        slot_id: Uuid,
        patch: TimeSlotPatch,
    ) -> ScheduleResult<WeeklyTemplate> {
        let mut template = self.load_existing(subject_id).await?;
        template.update_slot(day, slot_id, &patch)?;
        self.save(template).await
    }

    /// # Errors
    ///
    /// * `ScheduleError::NotFound` - template, day or slot does not exist
    pub async fn delete_slot(
        &self,
        subject_id: Uuid,
        day: DayOfWeek,
        slot_id: Uuid,
    ) -> ScheduleResult<WeeklyTemplate> {
        let mut template = self.load_existing(subject_id).await?;
        template.remove_slot(day, slot_id)?;
        self.save(template).await
    }

    pub async fn set_appointment_duration(
        &self,
        subject_id: Uuid,
        duration: AppointmentDuration,
    ) -> ScheduleResult<WeeklyTemplate> {
        let mut template = self.load_or_new(subject_id).await?;
        template.appointment_duration = duration;
        self.save(template).await
    }

    /// Removes the template together with all its days and slots.
    ///
    /// # Errors
    ///
    /// * `ScheduleError::NotFound` - the subject has no template
    pub async fn delete_template(&self, subject_id: Uuid) -> ScheduleResult<()> {
        if self.templates.delete_template(subject_id).await? {
            debug!(%subject_id, "Deleted weekly template");
            Ok(())
        } else {
            Err(ScheduleError::template_not_found(subject_id))
        }
    }

    async fn load_existing(&self, subject_id: Uuid) -> ScheduleResult<WeeklyTemplate> {
        self.templates
            .find_template_by_subject(subject_id)
            .await?
            .ok_or_else(|| ScheduleError::template_not_found(subject_id))
    }

    async fn load_or_new(&self, subject_id: Uuid) -> ScheduleResult<WeeklyTemplate> {
        match self.templates.find_template_by_subject(subject_id).await? {
            Some(template) => Ok(template),
            None => {
                debug!(%subject_id, "Starting a new weekly template");
                Ok(WeeklyTemplate::new(subject_id))
            }
        }
    }

    async fn save(&self, template: WeeklyTemplate) -> ScheduleResult<WeeklyTemplate> {
        Ok(self.templates.save_template(&template).await?)
    }
}
