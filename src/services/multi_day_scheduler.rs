use std::collections::{BTreeMap, HashSet};

use chrono::{Days, NaiveDate};
use serde_json::json;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::feasibility::{FeasibilityReport, SuggestionOutcome};
use crate::models::request::{ResolvedOptions, SchedulingRequest, SchedulingResult};
use crate::models::time_slot::BusyInterval;
use crate::models::work_item::{Allocation, WorkItem};
use crate::services::{
    conflict_detector, feasibility_analyzer, schedule_utils, single_item_scheduler,
    suggestion_engine,
};

/// Drives the per-item, per-date search across the whole request.
///
/// The scheduler is stateless; every call is an independent, synchronous
/// computation over the request snapshot it is given. Callers sharing one
/// calendar must serialize calls that touch overlapping date ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Self {
        Self
    }

    /// Schedule the whole batch, blocking on an infeasible window.
    ///
    /// The feasibility pre-flight runs first; when its outcome does not
    /// proceed automatically the call fails with `EngineError::Infeasible`
    /// carrying the report and ranked suggestions, and the caller must
    /// explicitly confirm via `schedule_confirmed`.
    pub fn schedule(&self, request: &SchedulingRequest) -> EngineResult<SchedulingResult> {
        let options = self.validate(request)?;

        let (report, outcome) = self.preflight(request, &options)?;
        if !outcome.should_proceed_automatically {
            return Err(EngineError::infeasible(
                outcome.message.clone(),
                report,
                outcome.suggestions,
            ));
        }

        self.run(request, &options)
    }

    /// Schedule the batch after the caller confirmed a partial result is
    /// acceptable. The pre-flight still runs for logging but never blocks.
    pub fn schedule_confirmed(&self, request: &SchedulingRequest) -> EngineResult<SchedulingResult> {
        let options = self.validate(request)?;
        let (report, _) = self.preflight(request, &options)?;
        debug!(
            target: "engine::scheduler",
            deficit = report.deficit_minutes,
            "scheduling with confirmed partial-result policy"
        );
        self.run(request, &options)
    }

    /// The standalone pre-flight surface: report plus proceed/block decision.
    pub fn check_feasibility(
        &self,
        request: &SchedulingRequest,
    ) -> EngineResult<(FeasibilityReport, SuggestionOutcome)> {
        let options = self.validate(request)?;
        self.preflight(request, &options)
    }

    fn preflight(
        &self,
        request: &SchedulingRequest,
        options: &ResolvedOptions,
    ) -> EngineResult<(FeasibilityReport, SuggestionOutcome)> {
        let report = feasibility_analyzer::analyze(
            &request.work_items,
            &request.availability,
            &request.existing_allocations,
            &request.external_busy,
            options,
        )?;
        let outcome = suggestion_engine::evaluate(
            &report,
            options.urgency_level,
            options.due_date.is_some(),
        );
        Ok((report, outcome))
    }

    fn validate(&self, request: &SchedulingRequest) -> EngineResult<ResolvedOptions> {
        let mut seen = HashSet::new();
        for item in &request.work_items {
            if item.estimated_duration_minutes <= 0 {
                return Err(EngineError::validation_with_details(
                    "work item duration must be positive",
                    json!({ "workItemId": item.id, "estimatedDurationMinutes": item.estimated_duration_minutes }),
                ));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(EngineError::validation_with_details(
                    "duplicate work item id in request",
                    json!({ "workItemId": item.id }),
                ));
            }
        }

        let mut allocated = HashSet::new();
        for allocation in &request.existing_allocations {
            if !allocated.insert(allocation.work_item_id.as_str()) {
                return Err(EngineError::validation_with_details(
                    "multiple active allocations for one work item",
                    json!({ "workItemId": allocation.work_item_id }),
                ));
            }
        }

        request.options.resolve()
    }

    fn run(
        &self,
        request: &SchedulingRequest,
        options: &ResolvedOptions,
    ) -> EngineResult<SchedulingResult> {
        let ordered = order_items(&request.work_items, options.respect_phase_order);
        let window_end = options.window_end();

        let already_allocated: HashSet<&str> = request
            .existing_allocations
            .iter()
            .map(|allocation| allocation.work_item_id.as_str())
            .collect();

        // Per-date committed minutes, seeded from the existing calendar so
        // dailyMaxMinutes caps the day's total, not just this run's share.
        let mut day_totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for allocation in &request.existing_allocations {
            *day_totals.entry(allocation.date).or_insert(0) += allocation.duration_minutes;
        }

        let mut committed = request.existing_allocations.clone();
        let mut scheduled: Vec<Allocation> = Vec::new();
        let mut busy = request.external_busy.clone();
        let mut unscheduled: Vec<String> = Vec::new();
        let mut cursor_date = options.effective_start;

        for item in &ordered {
            if already_allocated.contains(item.id.as_str()) {
                debug!(
                    target: "engine::scheduler",
                    work_item_id = %item.id,
                    "work item already on the calendar; skipping"
                );
                continue;
            }

            let mut placed = false;
            let mut date = cursor_date;
            while date < window_end {
                if exceeds_daily_cap(&day_totals, date, item.estimated_duration_minutes, options) {
                    date = next_day(date, window_end);
                    continue;
                }

                let candidate = single_item_scheduler::schedule_item_on_date(
                    item,
                    date,
                    &request.availability,
                    &committed,
                    &busy,
                )?;

                if let Some(allocation) = candidate {
                    // The resolver already subtracted committed time; a
                    // non-empty conflict set here means the snapshot was
                    // inconsistent, and the run must not commit it.
                    let conflicts = conflict_detector::find_conflicts(
                        allocation.date,
                        &allocation.time_slot,
                        allocation.duration_minutes,
                        &committed,
                        None,
                    )?;
                    if !conflicts.is_empty() {
                        return Err(EngineError::conflict(
                            format!(
                                "placement for work item {} overlaps committed allocations",
                                item.id
                            ),
                            conflicts,
                        ));
                    }

                    *day_totals.entry(date).or_insert(0) += allocation.duration_minutes;
                    if let Some(buffer) = buffer_interval(&allocation, options.buffer_minutes)? {
                        busy.push(buffer);
                    }
                    cursor_date = date;
                    committed.push(allocation.clone());
                    scheduled.push(allocation);
                    placed = true;
                    break;
                }

                date = next_day(date, window_end);
            }

            if !placed {
                debug!(
                    target: "engine::scheduler",
                    work_item_id = %item.id,
                    searched_days = options.max_days_to_search,
                    "work item exhausted the search window"
                );
                unscheduled.push(item.id.clone());
            }
        }

        let total_scheduled_minutes: i64 = scheduled
            .iter()
            .map(|allocation| allocation.duration_minutes)
            .sum();
        let completion_date = scheduled.iter().map(|allocation| allocation.date).max();
        let success = unscheduled.is_empty();
        let message = if success {
            format!(
                "Scheduled {} work items ({} minutes).",
                scheduled.len(),
                total_scheduled_minutes
            )
        } else {
            format!(
                "Scheduled {} of {} work items; {} found no fit within {} days.",
                scheduled.len(),
                ordered.len(),
                unscheduled.len(),
                options.max_days_to_search
            )
        };

        info!(
            target: "engine::scheduler",
            scheduled = scheduled.len(),
            unscheduled = unscheduled.len(),
            total_scheduled_minutes,
            "scheduling run finished"
        );

        Ok(SchedulingResult {
            success,
            scheduled_items: scheduled,
            total_scheduled_minutes,
            completion_date,
            message,
            unscheduled,
        })
    }
}

/// Batch order: input order, re-sorted stably by `(phase, order)` when phase
/// precedence is in effect. Items without a phase sort after phased ones.
fn order_items(items: &[WorkItem], respect_phase_order: bool) -> Vec<WorkItem> {
    let mut ordered = items.to_vec();
    if respect_phase_order {
        ordered.sort_by_key(|item| (item.phase.unwrap_or(i64::MAX), item.order));
    }
    ordered
}

fn exceeds_daily_cap(
    day_totals: &BTreeMap<NaiveDate, i64>,
    date: NaiveDate,
    duration: i64,
    options: &ResolvedOptions,
) -> bool {
    match options.daily_max_minutes {
        Some(cap) => day_totals.get(&date).copied().unwrap_or(0) + duration > cap,
        None => false,
    }
}

/// Dead time after a committed allocation, modeled as a synthetic busy
/// interval so later items can never be placed inside it. Clamped at the end
/// of the day; a buffer that would start at midnight is dropped.
fn buffer_interval(
    allocation: &Allocation,
    buffer_minutes: i64,
) -> EngineResult<Option<BusyInterval>> {
    if buffer_minutes <= 0 {
        return Ok(None);
    }
    let (_, end) = schedule_utils::slot_bounds(&allocation.time_slot)?;
    let buffer_end = (end + buffer_minutes).min(schedule_utils::MINUTES_PER_DAY - 1);
    if buffer_end <= end {
        return Ok(None);
    }
    Ok(Some(BusyInterval::new(
        allocation.date,
        schedule_utils::slot_from_bounds(end, buffer_end),
    )))
}

fn next_day(date: NaiveDate, window_end: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(window_end)
}
