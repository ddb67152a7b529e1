use chrono::NaiveDate;
use serde_json::json;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::time_slot::TimeSlot;
use crate::models::work_item::Allocation;
use crate::services::availability_resolver::occupied_range;
use crate::services::schedule_utils;

/// Check a candidate placement against every allocation on the same date and
/// return *all* conflicting allocations, not just the first.
///
/// Overlap is half-open: touching endpoints do not conflict. The candidate's
/// duration must fit inside its declared slot; overflow fails validation
/// ("insufficient window") rather than being silently truncated.
pub fn find_conflicts(
    date: NaiveDate,
    candidate_slot: &TimeSlot,
    duration_minutes: i64,
    allocations: &[Allocation],
    exclude_work_item: Option<&str>,
) -> EngineResult<Vec<Allocation>> {
    if duration_minutes <= 0 {
        return Err(EngineError::validation_with_details(
            "duration must be positive",
            json!({ "durationMinutes": duration_minutes }),
        ));
    }

    let (start, end) = schedule_utils::slot_bounds(candidate_slot)?;
    let effective_end = start + duration_minutes;
    if effective_end > end {
        return Err(EngineError::validation_with_details(
            "insufficient window for the requested duration",
            json!({
                "slot": format!("{candidate_slot}"),
                "slotMinutes": end - start,
                "durationMinutes": duration_minutes,
            }),
        ));
    }

    let mut conflicts = Vec::new();
    for allocation in allocations {
        if allocation.date != date {
            continue;
        }
        if exclude_work_item == Some(allocation.work_item_id.as_str()) {
            continue;
        }
        let (other_start, other_end) = occupied_range(allocation)?;
        if schedule_utils::ranges_overlap(start, effective_end, other_start, other_end) {
            conflicts.push(allocation.clone());
        }
    }

    debug!(
        target: "engine::conflict",
        %date,
        slot = %candidate_slot,
        duration_minutes,
        conflict_count = conflicts.len(),
        "conflict check"
    );

    Ok(conflicts)
}
