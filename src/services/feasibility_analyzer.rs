use std::collections::HashSet;

use chrono::Days;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::feasibility::FeasibilityReport;
use crate::models::request::ResolvedOptions;
use crate::models::time_slot::{BusyInterval, WeeklyAvailability};
use crate::models::work_item::{Allocation, WorkItem};
use crate::services::{availability_resolver, schedule_utils};

/// Aggregate capacity-vs-demand check over the search window.
///
/// Required time sums the durations of items not yet allocated; available
/// time sums each date's free minutes after subtracting existing allocations
/// and external busy intervals only — items still waiting for placement do
/// not count against capacity. O(days), cheap enough to run before every
/// scheduling attempt.
pub fn analyze(
    work_items: &[WorkItem],
    availability: &WeeklyAvailability,
    existing_allocations: &[Allocation],
    external_busy: &[BusyInterval],
    options: &ResolvedOptions,
) -> EngineResult<FeasibilityReport> {
    let already_allocated: HashSet<&str> = existing_allocations
        .iter()
        .map(|allocation| allocation.work_item_id.as_str())
        .collect();

    let total_required_minutes: i64 = work_items
        .iter()
        .filter(|item| !already_allocated.contains(item.id.as_str()))
        .map(|item| item.estimated_duration_minutes)
        .sum();

    let mut total_available = 0i64;
    let mut date = options.effective_start;
    let window_end = options.window_end();
    while date < window_end {
        let free = availability_resolver::resolve_free_slots(
            date,
            availability,
            existing_allocations,
            None,
            external_busy,
        )?;
        for slot in &free {
            total_available += schedule_utils::slot_duration_minutes(slot)?;
        }
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    let deficit_minutes = (total_required_minutes - total_available).max(0);
    let busy_ratio = if total_available > 0 {
        total_required_minutes as f64 / total_available as f64
    } else {
        0.0
    };

    let report = FeasibilityReport {
        total_required_minutes,
        total_available_minutes_in_window: total_available,
        deficit_minutes,
        days_in_window: options.max_days_to_search,
        busy_ratio,
    };

    debug!(
        target: "engine::feasibility",
        required = report.total_required_minutes,
        available = report.total_available_minutes_in_window,
        deficit = report.deficit_minutes,
        days = report.days_in_window,
        "feasibility analyzed"
    );

    Ok(report)
}
