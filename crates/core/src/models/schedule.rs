use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use uuid::Uuid;

use crate::errors::{ScheduleError, ScheduleResult};

/// Weekday of a template entry. Written as `Monday`..`Sunday`; any casing is
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ScheduleError::Validation(format!("Unknown day of week '{}'", value)))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Path segments and stored documents both come through here
impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Wall-clock time of day with minute precision, written as `HH:MM` (24-hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parses a strict `HH:MM` string. `9:00`, `09:00:00` and `24:00` are rejected.
    pub fn parse(value: &str) -> ScheduleResult<Self> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());

        if !well_formed {
            return Err(ScheduleError::Validation(format!(
                "Invalid time '{}': expected HH:MM",
                value
            )));
        }

        NaiveTime::parse_from_str(value, "%H:%M")
            .map(Self)
            .map_err(|_| ScheduleError::Validation(format!("Invalid time '{}': out of range", value)))
    }
}

impl From<NaiveTime> for ClockTime {
    // Seconds are dropped so that values read back from TIME columns compare
    // equal to the minute-precision slot boundaries.
    fn from(time: NaiveTime) -> Self {
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClockTime::parse(&raw).map_err(de::Error::custom)
    }
}

/// Minutes per appointment. Only the four values below are bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum AppointmentDuration {
    Fifteen,
    #[default]
    Thirty,
    FortyFive,
    Sixty,
}

impl AppointmentDuration {
    pub fn minutes(self) -> u16 {
        match self {
            AppointmentDuration::Fifteen => 15,
            AppointmentDuration::Thirty => 30,
            AppointmentDuration::FortyFive => 45,
            AppointmentDuration::Sixty => 60,
        }
    }
}

impl TryFrom<u16> for AppointmentDuration {
    type Error = ScheduleError;

    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        match minutes {
            15 => Ok(AppointmentDuration::Fifteen),
            30 => Ok(AppointmentDuration::Thirty),
            45 => Ok(AppointmentDuration::FortyFive),
            60 => Ok(AppointmentDuration::Sixty),
            other => Err(ScheduleError::Validation(format!(
                "Appointment duration must be one of 15, 30, 45 or 60 minutes, got {}",
                other
            ))),
        }
    }
}

impl From<AppointmentDuration> for u16 {
    fn from(duration: AppointmentDuration) -> Self {
        duration.minutes()
    }
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl TimeSlot {
    pub fn new(start_time: ClockTime, end_time: ClockTime, is_available: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            end_time,
            is_available,
        }
    }

    /// Applies only the fields present in `patch`.
    pub fn apply(&mut self, patch: &TimeSlotPatch) {
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(is_available) = patch.is_available {
            self.is_available = is_available;
        }
    }
}

/// Field-level update for a single slot. `start < end` is not re-checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSlotPatch {
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl DaySchedule {
    pub fn new(day_of_week: DayOfWeek) -> Self {
        Self {
            day_of_week,
            time_slots: Vec::new(),
        }
    }

    pub fn slot(&self, slot_id: Uuid) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|slot| slot.id == slot_id)
    }
}

/// A subject's recurring week. Owns its days, which own their slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTemplate {
    pub subject_id: Uuid,
    #[serde(default)]
    pub appointment_duration: AppointmentDuration,
    #[serde(with = "day_list", default)]
    pub days: BTreeMap<DayOfWeek, DaySchedule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeeklyTemplate {
    pub fn new(subject_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            subject_id,
            appointment_duration: AppointmentDuration::default(),
            days: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a template from its stored document form.
    pub fn from_parts(
        subject_id: Uuid,
        appointment_duration: AppointmentDuration,
        days: Vec<DaySchedule>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ScheduleResult<Self> {
        Ok(Self {
            subject_id,
            appointment_duration,
            days: days_from_list(days)?,
            created_at,
            updated_at,
        })
    }

    pub fn day(&self, day: DayOfWeek) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    /// Days in weekday order, as they are written to storage.
    pub fn day_list(&self) -> Vec<&DaySchedule> {
        self.days.values().collect()
    }

    pub fn replace_day_slots(&mut self, day: DayOfWeek, slots: Vec<TimeSlot>) -> &DaySchedule {
        let schedule = self
            .days
            .entry(day)
            .or_insert_with(|| DaySchedule::new(day));
        schedule.time_slots = slots;
        schedule
    }

    pub fn add_slot(&mut self, day: DayOfWeek, slot: TimeSlot) -> &TimeSlot {
        let schedule = self
            .days
            .entry(day)
            .or_insert_with(|| DaySchedule::new(day));
        schedule.time_slots.push(slot);
        &schedule.time_slots[schedule.time_slots.len() - 1]
    }

    pub fn update_slot(
        &mut self,
        day: DayOfWeek,
        slot_id: Uuid,
        patch: &TimeSlotPatch,
    ) -> ScheduleResult<&TimeSlot> {
        let slot = self.slot_mut(day, slot_id)?;
        slot.apply(patch);
        Ok(slot)
    }

    pub fn remove_slot(&mut self, day: DayOfWeek, slot_id: Uuid) -> ScheduleResult<TimeSlot> {
        let schedule = self.day_mut(day)?;
        let index = schedule
            .time_slots
            .iter()
            .position(|slot| slot.id == slot_id)
            .ok_or_else(|| ScheduleError::slot_not_found(day, slot_id))?;
        Ok(schedule.time_slots.remove(index))
    }

    fn day_mut(&mut self, day: DayOfWeek) -> ScheduleResult<&mut DaySchedule> {
        self.days
            .get_mut(&day)
            .ok_or_else(|| ScheduleError::day_not_configured(day))
    }

    fn slot_mut(&mut self, day: DayOfWeek, slot_id: Uuid) -> ScheduleResult<&mut TimeSlot> {
        self.day_mut(day)?
            .time_slots
            .iter_mut()
            .find(|slot| slot.id == slot_id)
            .ok_or_else(|| ScheduleError::slot_not_found(day, slot_id))
    }
}

/// Keys a list of days by weekday, rejecting a weekday that appears twice.
pub fn days_from_list(days: Vec<DaySchedule>) -> ScheduleResult<BTreeMap<DayOfWeek, DaySchedule>> {
    let mut map = BTreeMap::new();
    for day in days {
        let weekday = day.day_of_week;
        if map.insert(weekday, day).is_some() {
            return Err(ScheduleError::Validation(format!(
                "{} is listed more than once",
                weekday
            )));
        }
    }
    Ok(map)
}

mod day_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::{DayOfWeek, DaySchedule, days_from_list};

    pub fn serialize<S: Serializer>(
        days: &BTreeMap<DayOfWeek, DaySchedule>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(days.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<DayOfWeek, DaySchedule>, D::Error> {
        let days = Vec::<DaySchedule>::deserialize(deserializer)?;
        days_from_list(days).map_err(de::Error::custom)
    }
}

// Request/response payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl CreateTimeSlotRequest {
    /// Validates the payload and assigns a fresh slot id.
    pub fn into_slot(self) -> ScheduleResult<TimeSlot> {
        let start_time = ClockTime::parse(&self.start_time)?;
        let end_time = ClockTime::parse(&self.end_time)?;
        if start_time >= end_time {
            return Err(ScheduleError::Validation(format!(
                "Start time {} must be before end time {}",
                start_time, end_time
            )));
        }
        Ok(TimeSlot::new(start_time, end_time, self.is_available))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertDaySlotsRequest {
    #[serde(default)]
    pub slots: Vec<CreateTimeSlotRequest>,
}

impl UpsertDaySlotsRequest {
    pub fn into_slots(self) -> ScheduleResult<Vec<TimeSlot>> {
        self.slots
            .into_iter()
            .map(CreateTimeSlotRequest::into_slot)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTimeSlotRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_available: Option<bool>,
}

impl UpdateTimeSlotRequest {
    pub fn into_patch(self) -> ScheduleResult<TimeSlotPatch> {
        Ok(TimeSlotPatch {
            start_time: self.start_time.as_deref().map(ClockTime::parse).transpose()?,
            end_time: self.end_time.as_deref().map(ClockTime::parse).transpose()?,
            is_available: self.is_available,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAppointmentDurationRequest {
    pub appointment_duration: u16,
}
