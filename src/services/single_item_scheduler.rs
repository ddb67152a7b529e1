use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::time_slot::{BusyInterval, WeeklyAvailability};
use crate::models::work_item::{Allocation, WorkItem};
use crate::services::{availability_resolver, fragment_finder};

/// Place one work item on one date, or report that the date has no fit.
///
/// Picks the earliest-starting fragment long enough for the item's duration
/// and trims it to exactly that duration. Earliest start is the only
/// tie-break; no other ranking, so placement is deterministic.
pub fn schedule_item_on_date(
    item: &WorkItem,
    date: NaiveDate,
    availability: &WeeklyAvailability,
    allocations: &[Allocation],
    external_busy: &[BusyInterval],
) -> EngineResult<Option<Allocation>> {
    let required = item.estimated_duration_minutes;
    let free_slots =
        availability_resolver::resolve_free_slots(date, availability, allocations, None, external_busy)?;

    for window in &free_slots {
        // Windows are already conflict-subtracted and ascending, so the
        // first fragment of the first fitting window is the earliest start.
        let fragments = fragment_finder::find_fragments(window, &[], required)?;
        if let Some(fragment) = fragments.into_iter().next() {
            debug!(
                target: "engine::scheduler",
                work_item_id = %item.id,
                %date,
                slot = %fragment,
                "placed work item"
            );
            return Ok(Some(Allocation::new(&item.id, date, fragment, required)));
        }
    }

    Ok(None)
}
