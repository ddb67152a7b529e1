use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{EngineError, EngineResult};
use crate::models::time_slot::{BusyInterval, WeeklyAvailability};
use crate::models::work_item::{Allocation, WorkItem};

/// Search/placement strategy for one scheduling run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SchedulingMode {
    #[default]
    Flexible,
    Strict,
    Balanced,
}

/// Coarse deadline-pressure category; widens the feasibility band that still
/// proceeds automatically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Moderate,
    High,
    Critical,
}

fn default_max_days() -> i64 {
    14
}

/// Caller-facing option bag. `resolve` validates it and applies per-mode
/// defaults exactly once at entry; services only ever see the resolved copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingOptions {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub mode: SchedulingMode,
    #[serde(default)]
    pub respect_phase_order: bool,
    #[serde(default)]
    pub buffer_minutes: i64,
    #[serde(default)]
    pub daily_max_minutes: Option<i64>,
    #[serde(default = "default_max_days")]
    pub max_days_to_search: i64,
    #[serde(default)]
    pub start_next_day: bool,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl SchedulingOptions {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            mode: SchedulingMode::default(),
            respect_phase_order: false,
            buffer_minutes: 0,
            daily_max_minutes: None,
            max_days_to_search: default_max_days(),
            start_next_day: false,
            urgency_level: UrgencyLevel::default(),
            due_date: None,
        }
    }

    /// Validate and fold per-mode defaults into an immutable resolved config.
    ///
    /// Mode defaults:
    /// - `strict`: phase order is forced on, buffer as requested.
    /// - `balanced`: phase order is relaxed (input order rules) and the
    ///   buffer is halved.
    /// - `flexible`: everything as requested.
    pub fn resolve(&self) -> EngineResult<ResolvedOptions> {
        if self.buffer_minutes < 0 {
            return Err(EngineError::validation_with_details(
                "bufferMinutes must not be negative",
                json!({ "bufferMinutes": self.buffer_minutes }),
            ));
        }
        if self.max_days_to_search <= 0 {
            return Err(EngineError::validation_with_details(
                "maxDaysToSearch must be positive",
                json!({ "maxDaysToSearch": self.max_days_to_search }),
            ));
        }
        if let Some(cap) = self.daily_max_minutes {
            if cap <= 0 {
                return Err(EngineError::validation_with_details(
                    "dailyMaxMinutes must be positive when set",
                    json!({ "dailyMaxMinutes": cap }),
                ));
            }
        }

        let effective_start = if self.start_next_day {
            self.start_date
                .checked_add_days(Days::new(1))
                .ok_or_else(|| EngineError::validation("startDate overflows the calendar"))?
        } else {
            self.start_date
        };

        let (phase_order, buffer_minutes) = match self.mode {
            SchedulingMode::Strict => (true, self.buffer_minutes),
            SchedulingMode::Balanced => (false, self.buffer_minutes / 2),
            SchedulingMode::Flexible => (self.respect_phase_order, self.buffer_minutes),
        };

        Ok(ResolvedOptions {
            effective_start,
            mode: self.mode,
            respect_phase_order: phase_order,
            buffer_minutes,
            daily_max_minutes: self.daily_max_minutes,
            max_days_to_search: self.max_days_to_search,
            urgency_level: self.urgency_level,
            due_date: self.due_date,
        })
    }
}

/// Validated, immutable scheduling configuration. Built once per run by
/// `SchedulingOptions::resolve`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOptions {
    pub effective_start: NaiveDate,
    pub mode: SchedulingMode,
    pub respect_phase_order: bool,
    pub buffer_minutes: i64,
    pub daily_max_minutes: Option<i64>,
    pub max_days_to_search: i64,
    pub urgency_level: UrgencyLevel,
    pub due_date: Option<NaiveDate>,
}

impl ResolvedOptions {
    /// Exclusive end of the search window.
    pub fn window_end(&self) -> NaiveDate {
        self.effective_start
            .checked_add_days(Days::new(self.max_days_to_search as u64))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// One scheduling run's inputs. The engine never mutates these; it returns
/// new collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingRequest {
    pub work_items: Vec<WorkItem>,
    pub availability: WeeklyAvailability,
    #[serde(default)]
    pub existing_allocations: Vec<Allocation>,
    #[serde(default)]
    pub external_busy: Vec<BusyInterval>,
    pub options: SchedulingOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingResult {
    pub success: bool,
    pub scheduled_items: Vec<Allocation>,
    pub total_scheduled_minutes: i64,
    pub completion_date: Option<NaiveDate>,
    pub message: String,
    /// Work item ids that found no fit anywhere in the search window.
    #[serde(default)]
    pub unscheduled: Vec<String>,
}
