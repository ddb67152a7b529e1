use chrono::NaiveDate;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::feasibility::SlotCandidate;
use crate::models::time_slot::{BusyInterval, TimeSlot, WeeklyAvailability};
use crate::models::work_item::Allocation;
use crate::services::{availability_resolver, conflict_detector, fragment_finder, schedule_utils};

/// Candidates starting before this wall-clock minute get a soft warning.
const EARLY_START_MINUTES: i64 = 8 * 60;
/// Candidates ending after this wall-clock minute get a soft warning.
const LATE_END_MINUTES: i64 = 22 * 60;

/// Move one already-allocated work item to a new date and time slot.
///
/// All-or-nothing: the full replacement collection is computed and validated
/// first, then returned in one step — the caller's input is never mutated
/// and no intermediate state (zero or two allocations for the item) can ever
/// be observed. On any conflict the call fails carrying the complete
/// conflicting set. `now` is threaded in explicitly; target dates must be
/// strictly in the future.
pub fn relocate(
    allocations: &[Allocation],
    work_item_id: &str,
    new_date: NaiveDate,
    new_slot: &TimeSlot,
    now: NaiveDate,
) -> EngineResult<Vec<Allocation>> {
    if new_date <= now {
        return Err(EngineError::validation_with_details(
            "relocation target date must be in the future",
            json!({ "newDate": new_date.to_string(), "now": now.to_string() }),
        ));
    }

    let current = allocations
        .iter()
        .find(|allocation| allocation.work_item_id == work_item_id)
        .ok_or_else(|| {
            EngineError::validation_with_details(
                "no active allocation for work item",
                json!({ "workItemId": work_item_id }),
            )
        })?;

    let duration = current.duration_minutes;
    let conflicts = conflict_detector::find_conflicts(
        new_date,
        new_slot,
        duration,
        allocations,
        Some(work_item_id),
    )?;
    if !conflicts.is_empty() {
        return Err(EngineError::conflict(
            format!(
                "cannot move work item {work_item_id} to {new_date} {new_slot}: \
                 {} overlapping allocation(s)",
                conflicts.len()
            ),
            conflicts,
        ));
    }

    let mut updated: Vec<Allocation> = allocations
        .iter()
        .filter(|allocation| allocation.work_item_id != work_item_id)
        .cloned()
        .collect();
    updated.push(Allocation::new(
        work_item_id,
        new_date,
        new_slot.clone(),
        duration,
    ));

    info!(
        target: "engine::relocation",
        work_item_id,
        from_date = %current.date,
        to_date = %new_date,
        slot = %new_slot,
        "work item relocated"
    );

    Ok(updated)
}

/// Every fragment on `date` long enough for `required_duration`, with soft
/// warnings for placements outside comfortable hours. Used by move/extend
/// flows to offer concrete targets before the user commits.
pub fn calculate_available_time_slots(
    date: NaiveDate,
    required_duration: i64,
    availability: &WeeklyAvailability,
    allocations: &[Allocation],
    external_busy: &[BusyInterval],
    exclude_work_item: Option<&str>,
) -> EngineResult<Vec<SlotCandidate>> {
    if required_duration <= 0 {
        return Err(EngineError::validation_with_details(
            "required duration must be positive",
            json!({ "requiredDuration": required_duration }),
        ));
    }

    let free_slots = availability_resolver::resolve_free_slots(
        date,
        availability,
        allocations,
        exclude_work_item,
        external_busy,
    )?;

    let mut candidates = Vec::new();
    for window in &free_slots {
        for fragment in fragment_finder::find_fragments(window, &[], required_duration)? {
            let (start, end) = schedule_utils::slot_bounds(&fragment)?;
            let mut warnings = Vec::new();
            if start < EARLY_START_MINUTES {
                warnings.push(format!(
                    "starts before {}",
                    schedule_utils::minutes_to_time(EARLY_START_MINUTES)
                ));
            }
            if end > LATE_END_MINUTES {
                warnings.push(format!(
                    "ends after {}",
                    schedule_utils::minutes_to_time(LATE_END_MINUTES)
                ));
            }
            candidates.push(SlotCandidate {
                time_slot: fragment,
                warnings,
            });
        }
    }

    debug!(
        target: "engine::relocation",
        %date,
        required_duration,
        candidates = candidates.len(),
        "computed relocation candidates"
    );

    Ok(candidates)
}
