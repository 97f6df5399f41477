//! End-to-end scenarios: compile a plan, resolve the next workouts, project a calendar

use chrono::{TimeZone, Utc};

use periolifts_schedule::{
    CalendarEventProjector, CompletionRecord, DateKey, Error, NextWorkoutResolver, PlanId,
    ScheduleCompiler, ScheduleStore, WorkoutDayTemplate, WorkoutRef,
};

fn date(y: i32, m: u32, d: u32) -> DateKey {
    DateKey::new(y, m, d).unwrap()
}

fn push_pull_legs() -> Vec<WorkoutDayTemplate> {
    vec![
        WorkoutDayTemplate::new("push", "Push"),
        WorkoutDayTemplate::new("pull", "Pull"),
        WorkoutDayTemplate::new("legs", "Legs"),
    ]
}

fn summary(store: &ScheduleStore, start: DateKey, end: DateKey) -> Vec<(String, String)> {
    store.workouts_in_range(start, end).unwrap()
        .into_iter()
        .flat_map(|(date, list)| list.iter().map(move |w| (date.to_string(), w.workout_id().to_string())))
        .collect()
}

fn resolved(entries: &[periolifts_schedule::ResolvedWorkoutEntry]) -> Vec<(&str, String, bool)> {
    entries.iter()
        .map(|e| (e.workout_id.as_str(), e.scheduled_date.to_string(), e.is_overdue))
        .collect()
}

#[test]
fn compile_one_week_of_push_pull_legs() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = ScheduleCompiler::new(1).compile(&push_pull_legs(), date(2024, 1, 1));
    assert_eq!(summary(&store, date(2023, 12, 1), date(2024, 2, 1)), vec![
        ("2024-01-01".to_string(), "push".to_string()),
        ("2024-01-02".to_string(), "pull".to_string()),
        ("2024-01-03".to_string(), "legs".to_string()),
    ]);
}

#[test]
fn today_counts_as_overdue_then_completion_drops_the_entry() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = ScheduleCompiler::new(1).compile(&push_pull_legs(), date(2024, 1, 1));
    let resolver = NextWorkoutResolver::new(7, 30, 3);
    let today = date(2024, 1, 2);

    let result = resolver.resolve(&store, &[], today);
    assert_eq!(resolved(&result), vec![
        ("push", "2024-01-01".to_string(), true),
        ("pull", "2024-01-02".to_string(), true),
        ("legs", "2024-01-03".to_string(), false),
    ]);

    let completions = vec![
        CompletionRecord::completed("push", date(2024, 1, 1), Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap()),
    ];
    let result = resolver.resolve(&store, &completions, today);
    assert_eq!(resolved(&result), vec![
        ("pull", "2024-01-02".to_string(), true),
        ("legs", "2024-01-03".to_string(), false),
    ]);
}

#[test]
fn reversed_range_is_rejected() {
    let store = ScheduleCompiler::default().compile(&push_pull_legs(), date(2024, 1, 1));
    match store.workouts_in_range(date(2024, 1, 5), date(2024, 1, 1)) {
        Err(Error::InvalidRange { .. }) => (),
        other => panic!("expected an invalid range, got {:?}", other),
    }
}

#[test]
fn projector_does_not_validate_colors() {
    let mut store = ScheduleStore::new();
    store.add_workout(date(2024, 1, 1), WorkoutRef::new("push").with_calendar_color("blue"));
    let events = CalendarEventProjector::new(PlanId::from("plan"))
        .project(&store, date(2024, 1, 1), date(2024, 1, 1), &[])
        .unwrap();
    assert_eq!(events[0].calendar_color.as_deref(), Some("blue"));
}

#[test]
fn date_keys_round_trip_through_their_text_form() {
    let mut d = date(1999, 12, 1);
    let end = date(2001, 3, 31);
    while d <= end {
        assert_eq!(d.to_string().parse::<DateKey>().unwrap(), d);
        d = d.checked_add_days(1).unwrap();
    }
}

#[test]
fn duplicate_adds_keep_one_entry() {
    let mut store = ScheduleStore::new();
    let d = date(2024, 3, 4);
    store.add_workout(d, WorkoutRef::new("push"));
    store.add_workout(d, WorkoutRef::new("push"));
    let matching = store.workouts_for_date(&d).iter().filter(|w| w.workout_id() == "push").count();
    assert_eq!(matching, 1);
}

#[test]
fn compiled_stores_are_identical_for_any_range() {
    let templates = push_pull_legs();
    let a = ScheduleCompiler::new(5).compile(&templates, date(2024, 2, 20));
    let b = ScheduleCompiler::new(5).compile(&templates, date(2024, 2, 20));
    let ranges = [
        (date(2024, 2, 1), date(2024, 2, 28)),
        (date(2024, 2, 20), date(2024, 2, 20)),
        (date(2024, 3, 1), date(2024, 6, 1)),
    ];
    for (start, end) in ranges.iter() {
        assert_eq!(a.workouts_in_range(*start, *end).unwrap(), b.workouts_in_range(*start, *end).unwrap());
    }
}

#[test]
fn resolver_respects_cap_and_overdue_first_ordering() {
    let mut store = ScheduleStore::new();
    // Interleave past and future entries, with several per day
    for offset in 0..20u32 {
        let d = date(2024, 5, 1).checked_add_days(offset).unwrap();
        store.add_workout(d, WorkoutRef::new(format!("a{}", offset)));
        if offset % 3 == 0 {
            store.add_workout(d, WorkoutRef::new(format!("b{}", offset)).with_sort_order(-1));
        }
    }
    let completions = vec![
        CompletionRecord::completed("a8", date(2024, 5, 9), Utc.with_ymd_and_hms(2024, 5, 9, 7, 0, 0).unwrap()),
    ];

    for max in 0..8 {
        for today_offset in 0..20u32 {
            let today = date(2024, 5, 1).checked_add_days(today_offset).unwrap();
            let resolver = NextWorkoutResolver::new(3, 4, max);
            let result = resolver.resolve(&store, &completions, today);
            assert!(result.len() <= max);

            let first_future = result.iter().position(|e| e.is_overdue == false).unwrap_or(result.len());
            assert!(result[first_future..].iter().all(|e| e.is_overdue == false));
            assert!(result[..first_future].iter().all(|e| e.scheduled_date <= today));
            assert!(result[first_future..].iter().all(|e| e.scheduled_date > today));
            // a8 is done, it can only come back as an upcoming workout
            assert!(result.iter().all(|e| e.workout_id != "a8" || e.is_overdue == false));
        }
    }
}

#[test]
fn projection_of_three_single_entry_days() {
    let mut store = ScheduleStore::new();
    store.add_workout(date(2024, 1, 30), WorkoutRef::new("push"));
    store.add_workout(date(2024, 1, 31), WorkoutRef::new("pull"));
    store.add_workout(date(2024, 2, 1), WorkoutRef::new("legs"));

    let events = CalendarEventProjector::new(PlanId::random())
        .project(&store, date(2024, 1, 30), date(2024, 2, 1), &[])
        .unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.is_completed.is_none()));
}

#[test]
fn store_never_holds_empty_days() {
    let mut store = ScheduleStore::new();
    let days: Vec<DateKey> = (1..=4).map(|d| date(2024, 7, d)).collect();
    let ids = ["push", "pull", "legs", "core"];
    let mut step = 0usize;
    for round in 0..5 {
        for d in &days {
            for id in ids.iter().take(1 + round % ids.len()) {
                store.add_workout(*d, WorkoutRef::new(*id));
            }
        }
        for d in &days {
            for id in ids.iter().skip(step % 2) {
                store.remove_workout(d, id);
                assert!(store.iter().all(|(_, list)| list.is_empty() == false));
            }
            step += 1;
        }
    }
    assert!(store.iter().all(|(_, list)| list.is_empty() == false));
}
