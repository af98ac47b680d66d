//! # Availability Resolution
//!
//! Turns a recurring weekly template into the concrete windows a patient can
//! book on one calendar date.
//!
//! 1. No template means no availability.
//! 2. The date's weekday selects a [`DaySchedule`](crate::models::schedule::DaySchedule).
//! 3. Bookings on that date that still hold their slot (PENDING or CONFIRMED)
//!    form the booked set, keyed by start time.
//! 4. Slots are walked in insertion order; unavailable slots and slots whose
//!    start time is booked are dropped, the rest become windows.
//!
//! A booking is matched against a slot by exact start time only. A booking
//! that starts inside a slot, or spans several slots, does not remove them.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::models::{
    availability::AvailableWindow,
    booking::Booking,
    schedule::{ClockTime, DayOfWeek, WeeklyTemplate},
};

/// Resolves bookable windows for `date`.
///
/// `bookings` may contain entries for other dates, other subjects or with
/// non-occupying statuses; those are ignored. The output keeps the order the
/// slots were configured in.
pub fn resolve_available_slots(
    template: Option<&WeeklyTemplate>,
    date: NaiveDate,
    bookings: &[Booking],
) -> Vec<AvailableWindow> {
    let Some(template) = template else {
        return Vec::new();
    };

    let Some(day) = template.day(weekday_of(date)) else {
        return Vec::new();
    };

    let booked: HashSet<ClockTime> = bookings
        .iter()
        .filter(|booking| {
            booking.subject_id == template.subject_id
                && booking.date == date
                && booking.status.occupies_slot()
        })
        .map(|booking| booking.start_time)
        .collect();

    let duration_minutes = template.appointment_duration.minutes();

    day.time_slots
        .iter()
        .filter(|slot| slot.is_available)
        .filter(|slot| !booked.contains(&slot.start_time))
        .map(|slot| AvailableWindow {
            start_time: slot.start_time,
            end_time: slot.end_time,
            duration_minutes,
        })
        .collect()
}

/// Weekday of a naive calendar date. No timezone is involved.
pub fn weekday_of(date: NaiveDate) -> DayOfWeek {
    DayOfWeek::from(date.weekday())
}

/// True when the template has at least one slot configured for `date`'s weekday.
pub fn has_slots_on(template: &WeeklyTemplate, date: NaiveDate) -> bool {
    template
        .day(weekday_of(date))
        .is_some_and(|day| !day.time_slots.is_empty())
}
