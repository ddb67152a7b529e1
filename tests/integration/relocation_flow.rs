use chrono::NaiveDate;
use chronoplan::{
    calculate_available_time_slots, relocate, Allocation, BusyInterval, EngineError, TimeSlot,
    WeeklyAvailability,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).expect("valid date")
}

fn count_for(allocations: &[Allocation], work_item_id: &str) -> usize {
    allocations
        .iter()
        .filter(|allocation| allocation.work_item_id == work_item_id)
        .count()
}

#[test]
fn move_to_an_occupied_tuesday_fails_and_leaves_monday_intact() {
    // X on Monday 09:00-10:00, Y on Tuesday 09:30-10:30.
    let allocations = vec![
        Allocation::new("x", day(2), TimeSlot::new("09:00", "10:00"), 60),
        Allocation::new("y", day(3), TimeSlot::new("09:30", "10:30"), 60),
    ];

    let result = relocate(
        &allocations,
        "x",
        day(3),
        &TimeSlot::new("09:00", "10:00"),
        day(1),
    );

    match result {
        Err(EngineError::Conflict { conflicts, .. }) => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].work_item_id, "y");
        }
        other => panic!("expected a conflict, got {other:?}"),
    }

    // Exactly one allocation for X, still on Monday.
    assert_eq!(count_for(&allocations, "x"), 1);
    let x = allocations
        .iter()
        .find(|allocation| allocation.work_item_id == "x")
        .expect("x still allocated");
    assert_eq!(x.date, day(2));
}

#[test]
fn successful_move_swaps_the_collection_atomically() {
    let allocations = vec![
        Allocation::new("x", day(2), TimeSlot::new("09:00", "10:00"), 60),
        Allocation::new("y", day(3), TimeSlot::new("09:30", "10:30"), 60),
    ];

    let updated = relocate(
        &allocations,
        "x",
        day(4),
        &TimeSlot::new("14:00", "15:00"),
        day(1),
    )
    .expect("relocation");

    assert_eq!(updated.len(), 2);
    assert_eq!(count_for(&updated, "x"), 1);
    assert_eq!(count_for(&updated, "y"), 1);
    let x = updated
        .iter()
        .find(|allocation| allocation.work_item_id == "x")
        .expect("moved x");
    assert_eq!(x.date, day(4));
    assert_eq!(x.time_slot, TimeSlot::new("14:00", "15:00"));
    assert_eq!(x.duration_minutes, 60);
}

#[test]
fn touching_slots_relocate_cleanly() {
    let allocations = vec![
        Allocation::new("x", day(2), TimeSlot::new("09:00", "10:00"), 60),
        Allocation::new("y", day(3), TimeSlot::new("09:00", "10:00"), 60),
    ];

    // 10:00-11:00 touches Y's end but does not overlap it.
    let updated = relocate(
        &allocations,
        "x",
        day(3),
        &TimeSlot::new("10:00", "11:00"),
        day(1),
    )
    .expect("touching endpoints must not conflict");
    assert_eq!(count_for(&updated, "x"), 1);
}

#[test]
fn twenty_minute_hole_offers_no_thirty_minute_candidates() {
    // Monday fully booked except 14:00-14:20.
    let availability = WeeklyAvailability {
        monday: vec![TimeSlot::new("09:00", "17:00")],
        ..WeeklyAvailability::default()
    };
    let busy = vec![
        BusyInterval::new(day(2), TimeSlot::new("09:00", "14:00")),
        BusyInterval::new(day(2), TimeSlot::new("14:20", "17:00")),
    ];

    let candidates = calculate_available_time_slots(day(2), 30, &availability, &[], &busy, None)
        .expect("candidates");
    assert!(candidates.is_empty());
}

#[test]
fn excluding_the_moving_item_reveals_its_own_slot() {
    let availability = WeeklyAvailability {
        monday: vec![TimeSlot::new("09:00", "10:00")],
        ..WeeklyAvailability::default()
    };
    let allocations = vec![Allocation::new(
        "x",
        day(2),
        TimeSlot::new("09:00", "10:00"),
        60,
    )];

    let without_exclusion =
        calculate_available_time_slots(day(2), 60, &availability, &allocations, &[], None)
            .expect("candidates");
    assert!(without_exclusion.is_empty());

    let with_exclusion =
        calculate_available_time_slots(day(2), 60, &availability, &allocations, &[], Some("x"))
            .expect("candidates");
    assert_eq!(with_exclusion.len(), 1);
    assert_eq!(with_exclusion[0].time_slot, TimeSlot::new("09:00", "10:00"));
}

#[test]
fn relocation_rejects_non_future_dates() {
    let allocations = vec![Allocation::new(
        "x",
        day(2),
        TimeSlot::new("09:00", "10:00"),
        60,
    )];

    for target in [day(1), day(5)] {
        let result = relocate(
            &allocations,
            "x",
            target,
            &TimeSlot::new("09:00", "10:00"),
            day(5),
        );
        assert!(
            matches!(result, Err(EngineError::Validation { .. })),
            "target {target} should be rejected against now = {}",
            day(5)
        );
    }
}
