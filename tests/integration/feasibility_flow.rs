use chrono::NaiveDate;
use chronoplan::{
    EngineError, Scheduler, SchedulingOptions, SchedulingRequest, SuggestionKind, TimeSlot,
    UrgencyLevel, WeeklyAvailability, WorkItem,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
}

fn three_day_window_request(required: Vec<WorkItem>) -> SchedulingRequest {
    // Mon/Tue/Wed offering 100 free minutes each: 300 in the window.
    let per_day = vec![TimeSlot::new("09:00", "10:40")];
    let availability = WeeklyAvailability {
        monday: per_day.clone(),
        tuesday: per_day.clone(),
        wednesday: per_day,
        ..WeeklyAvailability::default()
    };
    let mut options = SchedulingOptions::new(monday());
    options.max_days_to_search = 3;
    options.due_date = monday().succ_opt().and_then(|d| d.succ_opt());
    SchedulingRequest {
        work_items: required,
        availability,
        existing_allocations: Vec::new(),
        external_busy: Vec::new(),
        options,
    }
}

#[test]
fn six_hundred_required_over_three_hundred_free_blocks_with_extend_deadline_first() {
    let request = three_day_window_request(vec![
        WorkItem::new("a", "A", 300),
        WorkItem::new("b", "B", 300),
    ]);

    let (report, outcome) = Scheduler::new()
        .check_feasibility(&request)
        .expect("pre-flight");
    assert_eq!(report.total_required_minutes, 600);
    assert_eq!(report.total_available_minutes_in_window, 300);
    assert_eq!(report.deficit_minutes, 300);
    assert!(!outcome.should_proceed_automatically);
    assert_eq!(outcome.suggestions[0].kind, SuggestionKind::ExtendDeadline);
    assert!(outcome.suggestions[0].user_message.contains("300"));
}

#[test]
fn proceed_decision_matches_zero_deficit_at_default_urgency() {
    // Fits exactly: proceeds.
    let fitting = three_day_window_request(vec![WorkItem::new("a", "A", 300)]);
    let (report, outcome) = Scheduler::new().check_feasibility(&fitting).expect("pre-flight");
    assert_eq!(report.deficit_minutes, 0);
    assert!(outcome.should_proceed_automatically);

    // One minute over: blocks at the default urgency.
    let over = three_day_window_request(vec![WorkItem::new("a", "A", 301)]);
    let (report, outcome) = Scheduler::new().check_feasibility(&over).expect("pre-flight");
    assert_eq!(report.deficit_minutes, 1);
    assert!(!outcome.should_proceed_automatically);
}

#[test]
fn higher_urgency_widens_the_auto_proceed_band() {
    // 330 required vs 300 free: ~10% short.
    let mut request = three_day_window_request(vec![
        WorkItem::new("a", "A", 200),
        WorkItem::new("b", "B", 130),
    ]);

    request.options.urgency_level = UrgencyLevel::Low;
    let (_, low) = Scheduler::new().check_feasibility(&request).expect("pre-flight");
    assert!(!low.should_proceed_automatically);

    request.options.urgency_level = UrgencyLevel::Moderate;
    let (_, moderate) = Scheduler::new().check_feasibility(&request).expect("pre-flight");
    assert!(moderate.should_proceed_automatically);
    assert!(moderate.message.contains("30"));
}

#[test]
fn infeasible_error_carries_report_and_ranked_suggestions() {
    let request = three_day_window_request(vec![
        WorkItem::new("a", "A", 300),
        WorkItem::new("b", "B", 300),
    ]);

    match Scheduler::new().schedule(&request) {
        Err(EngineError::Infeasible {
            report,
            suggestions,
            ..
        }) => {
            assert_eq!(report.deficit_minutes, 300);
            let kinds: Vec<SuggestionKind> = suggestions.iter().map(|s| s.kind).collect();
            assert_eq!(
                kinds,
                vec![
                    SuggestionKind::ExtendDeadline,
                    SuggestionKind::ReduceScope,
                    SuggestionKind::AddAvailability,
                    SuggestionKind::ShortenItems,
                ]
            );
        }
        other => panic!("expected infeasible error, got {other:?}"),
    }
}

#[test]
fn confirmed_run_schedules_what_fits_and_lists_the_rest() {
    let request = three_day_window_request(vec![
        WorkItem::new("a", "A", 100),
        WorkItem::new("b", "B", 100),
        WorkItem::new("c", "C", 100),
        WorkItem::new("d", "D", 100),
    ]);

    let result = Scheduler::new()
        .schedule_confirmed(&request)
        .expect("confirmed run");
    assert!(!result.success);
    assert_eq!(result.scheduled_items.len(), 3);
    assert_eq!(result.total_scheduled_minutes, 300);
    assert_eq!(result.unscheduled, vec!["d".to_string()]);
}

#[test]
fn logging_can_write_to_a_caller_supplied_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    chronoplan::utils::logger::init_logging(Some(dir.path())).expect("logger init");

    // Emit something through the engine so the subscriber sees traffic.
    let request = three_day_window_request(vec![WorkItem::new("a", "A", 100)]);
    Scheduler::new().schedule(&request).expect("schedule");
}
