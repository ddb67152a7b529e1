use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::time_slot::{BusyInterval, TimeSlot, WeeklyAvailability};
use crate::models::work_item::Allocation;
use crate::services::schedule_utils;

/// Turn weekly recurring availability into concrete, conflict-subtracted
/// free slots for one date.
///
/// Output is ordered strictly ascending by start, pairwise non-overlapping,
/// with zero-length slots dropped. Identical inputs always produce identical
/// output.
pub fn resolve_free_slots(
    date: NaiveDate,
    availability: &WeeklyAvailability,
    allocations: &[Allocation],
    exclude_work_item: Option<&str>,
    external_busy: &[BusyInterval],
) -> EngineResult<Vec<TimeSlot>> {
    let raw = availability.slots_for(date.weekday());
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let free_windows = schedule_utils::normalize_slots(raw)?;
    let busy = collect_busy_ranges(date, allocations, exclude_work_item, external_busy)?;

    let mut free = Vec::new();
    for window in free_windows {
        for (start, end) in schedule_utils::subtract_ranges(window, &busy) {
            free.push(schedule_utils::slot_from_bounds(start, end));
        }
    }

    debug!(
        target: "engine::availability",
        %date,
        weekday = ?date.weekday(),
        free_slots = free.len(),
        "resolved availability"
    );

    Ok(free)
}

/// Merge the date's allocations and external busy intervals into one sorted,
/// non-overlapping set of occupied minute ranges.
fn collect_busy_ranges(
    date: NaiveDate,
    allocations: &[Allocation],
    exclude_work_item: Option<&str>,
    external_busy: &[BusyInterval],
) -> EngineResult<Vec<(i64, i64)>> {
    let mut ranges = Vec::new();

    for allocation in allocations {
        if allocation.date != date {
            continue;
        }
        if exclude_work_item == Some(allocation.work_item_id.as_str()) {
            continue;
        }
        ranges.push(occupied_range(allocation)?);
    }

    for busy in external_busy {
        if busy.date != date {
            continue;
        }
        ranges.push(schedule_utils::slot_bounds(&busy.time_slot)?);
    }

    Ok(schedule_utils::merge_ranges(ranges))
}

/// The minute range an allocation actually blocks: its duration from the
/// slot start, never past the slot end.
pub fn occupied_range(allocation: &Allocation) -> EngineResult<(i64, i64)> {
    let (start, end) = schedule_utils::slot_bounds(&allocation.time_slot)?;
    Ok((start, end.min(start + allocation.duration_minutes)))
}
