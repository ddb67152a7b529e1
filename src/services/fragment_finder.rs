use crate::error::EngineResult;
use crate::models::time_slot::TimeSlot;
use crate::models::work_item::Allocation;
use crate::services::availability_resolver::occupied_range;
use crate::services::schedule_utils;

/// Extract usable fragments from one free window broken up by known
/// conflicts.
///
/// Walks the conflicts left to right; whenever the gap before the next
/// conflict (or the window end) holds the required duration, a fragment
/// capped at exactly that duration is emitted — never more, so the rest of
/// the gap stays available. O(k) for k conflicts once sorted.
pub fn find_fragments(
    window: &TimeSlot,
    conflicts: &[Allocation],
    required_minutes: i64,
) -> EngineResult<Vec<TimeSlot>> {
    let (window_start, window_end) = schedule_utils::slot_bounds(window)?;
    if required_minutes <= 0 || window_end - window_start < required_minutes {
        return Ok(Vec::new());
    }

    let mut occupied = Vec::with_capacity(conflicts.len());
    for conflict in conflicts {
        let (start, end) = occupied_range(conflict)?;
        if schedule_utils::ranges_overlap(window_start, window_end, start, end) {
            occupied.push((start.max(window_start), end.min(window_end)));
        }
    }
    let occupied = schedule_utils::merge_ranges(occupied);

    let mut fragments = Vec::new();
    let mut cursor = window_start;
    for (busy_start, busy_end) in occupied {
        if busy_start - cursor >= required_minutes {
            fragments.push(schedule_utils::slot_from_bounds(
                cursor,
                cursor + required_minutes,
            ));
        }
        cursor = cursor.max(busy_end);
    }
    if window_end - cursor >= required_minutes {
        fragments.push(schedule_utils::slot_from_bounds(
            cursor,
            cursor + required_minutes,
        ));
    }

    Ok(fragments)
}
