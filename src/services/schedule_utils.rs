use serde_json::json;

use crate::error::{EngineError, EngineResult};
use crate::models::time_slot::TimeSlot;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse a wall-clock `HH:MM` value into minutes from midnight.
///
/// Strict two-field format; hours 0..=23, minutes 0..=59. `24:00` is
/// rejected — availability that runs to midnight is expressed as `23:59`.
pub fn time_to_minutes(value: &str) -> EngineResult<i64> {
    let mut parts = value.splitn(2, ':');
    let (hours, minutes) = match (parts.next(), parts.next()) {
        (Some(h), Some(m)) if h.len() == 2 && m.len() == 2 => (h, m),
        _ => {
            return Err(EngineError::validation_with_details(
                "time must use the HH:MM format",
                json!({ "value": value }),
            ))
        }
    };

    let hours: i64 = hours.parse().map_err(|_| {
        EngineError::validation_with_details("invalid hour field", json!({ "value": value }))
    })?;
    let minutes: i64 = minutes.parse().map_err(|_| {
        EngineError::validation_with_details("invalid minute field", json!({ "value": value }))
    })?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(EngineError::validation_with_details(
            "time out of range",
            json!({ "value": value }),
        ));
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes from midnight back into `HH:MM`. Inverse of
/// `time_to_minutes` for any value a valid slot can produce.
pub fn minutes_to_time(total_minutes: i64) -> String {
    let clamped = total_minutes.clamp(0, MINUTES_PER_DAY - 1);
    format!("{:02}:{:02}", clamped / 60, clamped % 60)
}

/// Parse a slot into its `(start, end)` minute bounds, enforcing start < end.
pub fn slot_bounds(slot: &TimeSlot) -> EngineResult<(i64, i64)> {
    let start = time_to_minutes(&slot.start)?;
    let end = time_to_minutes(&slot.end)?;
    if end <= start {
        return Err(EngineError::validation_with_details(
            "time slot end must be after its start",
            json!({ "start": slot.start, "end": slot.end }),
        ));
    }
    Ok((start, end))
}

pub fn slot_duration_minutes(slot: &TimeSlot) -> EngineResult<i64> {
    let (start, end) = slot_bounds(slot)?;
    Ok(end - start)
}

pub fn slot_from_bounds(start: i64, end: i64) -> TimeSlot {
    TimeSlot::new(minutes_to_time(start), minutes_to_time(end))
}

/// Half-open interval overlap: touching endpoints do not conflict.
pub fn ranges_overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && b_start < a_end
}

/// Sort minute ranges ascending and merge overlapping or adjacent ones.
pub fn merge_ranges(mut ranges: Vec<(i64, i64)>) -> Vec<(i64, i64)> {
    ranges.retain(|(start, end)| end > start);
    ranges.sort_by_key(|(start, _)| *start);

    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => {
                if end > *last_end {
                    *last_end = end;
                }
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Subtract merged busy ranges from one free range, yielding the remaining
/// sub-ranges in ascending order. Zero-length remainders are dropped.
pub fn subtract_ranges(free: (i64, i64), busy: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let (free_start, free_end) = free;
    let mut remaining = Vec::new();
    let mut cursor = free_start;

    for &(busy_start, busy_end) in busy {
        if busy_end <= cursor {
            continue;
        }
        if busy_start >= free_end {
            break;
        }
        if busy_start > cursor {
            remaining.push((cursor, busy_start.min(free_end)));
        }
        cursor = cursor.max(busy_end);
        if cursor >= free_end {
            return remaining;
        }
    }

    if cursor < free_end {
        remaining.push((cursor, free_end));
    }
    remaining
}

/// Validate caller-supplied slots and return their merged minute ranges.
/// Overlapping or adjacent raw slots are tolerated and folded together.
pub fn normalize_slots(slots: &[TimeSlot]) -> EngineResult<Vec<(i64, i64)>> {
    let mut ranges = Vec::with_capacity(slots.len());
    for slot in slots {
        ranges.push(slot_bounds(slot)?);
    }
    Ok(merge_ranges(ranges))
}
