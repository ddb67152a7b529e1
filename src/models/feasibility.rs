use serde::{Deserialize, Serialize};

use crate::models::time_slot::TimeSlot;

/// Aggregate capacity-vs-demand comparison over a search window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityReport {
    pub total_required_minutes: i64,
    pub total_available_minutes_in_window: i64,
    pub deficit_minutes: i64,
    pub days_in_window: i64,
    /// required / available; 0 when the window offers no free time at all.
    pub busy_ratio: f64,
}

impl FeasibilityReport {
    pub fn is_feasible(&self) -> bool {
        self.deficit_minutes == 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionKind {
    ExtendDeadline,
    ReduceScope,
    AddAvailability,
    ShortenItems,
}

/// One ranked remediation option for an infeasible schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub should_proceed_automatically: bool,
    pub user_message: String,
}

/// The suggestion engine's proceed/block decision plus its ranked options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionOutcome {
    pub should_proceed_automatically: bool,
    pub message: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// A fitting fragment returned by `calculate_available_time_slots`, with
/// soft warnings for early-morning or late-evening placements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotCandidate {
    pub time_slot: TimeSlot,
    #[serde(default)]
    pub warnings: Vec<String>,
}
