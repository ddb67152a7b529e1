use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A minute-resolution wall-clock interval within one day, textual `HH:MM`.
///
/// `start < end` is enforced when the slot is parsed, not at construction;
/// callers hand slots over as plain strings and the engine validates them at
/// every entry point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

impl TimeSlot {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// A user's recurring free-time windows grouped by day of week.
///
/// Slots within a day should be non-overlapping and ascending, but the
/// engine normalizes caller-supplied overlaps defensively before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailability {
    #[serde(default)]
    pub monday: Vec<TimeSlot>,
    #[serde(default)]
    pub tuesday: Vec<TimeSlot>,
    #[serde(default)]
    pub wednesday: Vec<TimeSlot>,
    #[serde(default)]
    pub thursday: Vec<TimeSlot>,
    #[serde(default)]
    pub friday: Vec<TimeSlot>,
    #[serde(default)]
    pub saturday: Vec<TimeSlot>,
    #[serde(default)]
    pub sunday: Vec<TimeSlot>,
}

impl WeeklyAvailability {
    pub fn slots_for(&self, weekday: Weekday) -> &[TimeSlot] {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn set_slots_for(&mut self, weekday: Weekday, slots: Vec<TimeSlot>) {
        match weekday {
            Weekday::Mon => self.monday = slots,
            Weekday::Tue => self.tuesday = slots,
            Weekday::Wed => self.wednesday = slots,
            Weekday::Thu => self.thursday = slots,
            Weekday::Fri => self.friday = slots,
            Weekday::Sat => self.saturday = slots,
            Weekday::Sun => self.sunday = slots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.monday.is_empty()
            && self.tuesday.is_empty()
            && self.wednesday.is_empty()
            && self.thursday.is_empty()
            && self.friday.is_empty()
            && self.saturday.is_empty()
            && self.sunday.is_empty()
    }
}

/// Externally-owned busy time (calendar imports, meetings) on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusyInterval {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
}

impl BusyInterval {
    pub fn new(date: NaiveDate, time_slot: TimeSlot) -> Self {
        Self { date, time_slot }
    }
}
