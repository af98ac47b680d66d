//! In-process store used by tests and local runs without PostgreSQL.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::{Result, eyre};
use medsched_core::{
    models::{
        booking::{Booking, BookingStatus},
        schedule::WeeklyTemplate,
    },
    store::{BookingStore, TemplateStore},
};
use uuid::Uuid;

/// Keeps templates keyed by subject and a flat list of bookings.
///
/// Saves behave like the PostgreSQL upsert: `created_at` survives from the
/// first write and `updated_at` is stamped on every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    templates: RwLock<HashMap<Uuid, WeeklyTemplate>>,
    bookings: RwLock<Vec<Booking>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a booking as the booking flow would.
    pub fn insert_booking(&self, booking: Booking) -> Result<()> {
        self.bookings
            .write()
            .map_err(|_| eyre!("Booking store lock poisoned"))?
            .push(booking);
        Ok(())
    }

    pub fn template_count(&self) -> Result<usize> {
        Ok(self
            .templates
            .read()
            .map_err(|_| eyre!("Template store lock poisoned"))?
            .len())
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn find_template_by_subject(&self, subject_id: Uuid) -> Result<Option<WeeklyTemplate>> {
        let templates = self
            .templates
            .read()
            .map_err(|_| eyre!("Template store lock poisoned"))?;
        Ok(templates.get(&subject_id).cloned())
    }

    async fn save_template(&self, template: &WeeklyTemplate) -> Result<WeeklyTemplate> {
        let mut templates = self
            .templates
            .write()
            .map_err(|_| eyre!("Template store lock poisoned"))?;

        let mut stored = template.clone();
        stored.updated_at = Utc::now();
        if let Some(existing) = templates.get(&template.subject_id) {
            stored.created_at = existing.created_at;
        }

        templates.insert(stored.subject_id, stored.clone());
        Ok(stored)
    }

    async fn delete_template(&self, subject_id: Uuid) -> Result<bool> {
        let mut templates = self
            .templates
            .write()
            .map_err(|_| eyre!("Template store lock poisoned"))?;
        Ok(templates.remove(&subject_id).is_some())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_bookings(
        &self,
        subject_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        statuses: &[BookingStatus],
    ) -> Result<Vec<Booking>> {
        let bookings = self
            .bookings
            .read()
            .map_err(|_| eyre!("Booking store lock poisoned"))?;

        Ok(bookings
            .iter()
            .filter(|b| b.subject_id == subject_id)
            .filter(|b| b.date >= from && b.date <= to)
            .filter(|b| statuses.contains(&b.status))
            .cloned()
            .collect())
    }
}
