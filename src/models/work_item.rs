use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::time_slot::TimeSlot;

/// A schedulable unit of work with an estimated duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    pub estimated_duration_minutes: i64,
    /// Position within the parent task; ties inside a phase break on this.
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub phase: Option<i64>,
    #[serde(default)]
    pub parent_task_id: Option<String>,
}

impl WorkItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimated_duration_minutes: duration_minutes,
            order: 0,
            phase: None,
            parent_task_id: None,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_phase(mut self, phase: i64) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// A concrete placement of a work item on a specific date and time interval.
///
/// At most one active allocation exists per `work_item_id`; relocation
/// replaces the whole record and assigns a fresh `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: String,
    pub work_item_id: String,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub duration_minutes: i64,
}

impl Allocation {
    pub fn new(
        work_item_id: impl Into<String>,
        date: NaiveDate,
        time_slot: TimeSlot,
        duration_minutes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            work_item_id: work_item_id.into(),
            date,
            time_slot,
            duration_minutes,
        }
    }
}
