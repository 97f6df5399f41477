//! Some utility functions

use crate::projector::{CalendarEvent, EventStatus};
use crate::resolver::ResolvedWorkoutEntry;
use crate::store::ScheduleStore;

/// A debug utility that pretty-prints a schedule
pub fn print_schedule(store: &ScheduleStore) {
    for (date, workouts) in store.iter() {
        println!("{} ({})", date, date.weekday_name());
        for workout in workouts {
            let rest = if workout.is_rest_day() { " (rest)" } else { "" };
            println!("    [{}] {}{}", workout.sort_order(), workout.workout_id(), rest);
        }
    }
}

pub fn print_next_workouts(entries: &[ResolvedWorkoutEntry]) {
    if entries.is_empty() {
        println!("    nothing scheduled");
    }
    for entry in entries {
        let overdue = if entry.is_overdue { "!" } else { " " };
        println!("    {} {}\t{}", overdue, entry.scheduled_date, entry.workout_id);
    }
}

pub fn print_calendar_events(events: &[CalendarEvent]) {
    for event in events {
        let completion = match event.status() {
            EventStatus::Completed => "✓",
            EventStatus::Missed => "x",
            EventStatus::NotAttempted => " ",
        };
        let rest = if event.is_rest_day { "rest" } else { "" };
        println!("    {} {} {}\t{}\t{}", completion, event.scheduled_date, event.day_of_week, event.workout_id, rest);
    }
}
