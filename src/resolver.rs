//! "What should I do next?"
//!
//! The resolver looks at a schedule around "today" and returns a short list of workouts:
//! first the ones that are overdue (scheduled in the last few days, including today, and not completed yet),
//! then the upcoming ones.

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::store::ScheduleStore;
use crate::workout::{CompletionIndex, CompletionRecord};

pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 30;
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// One suggested workout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWorkoutEntry {
    pub workout_id: String,
    pub scheduled_date: DateKey,
    /// Scheduled today or earlier, and not completed
    pub is_overdue: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextWorkoutResolver {
    lookback_days: u32,
    lookahead_days: u32,
    max_results: usize,
}

impl Default for NextWorkoutResolver {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl NextWorkoutResolver {
    pub fn new(lookback_days: u32, lookahead_days: u32, max_results: usize) -> Self {
        Self { lookback_days, lookahead_days, max_results }
    }

    pub fn lookback_days(&self) -> u32  { self.lookback_days }
    pub fn lookahead_days(&self) -> u32 { self.lookahead_days }
    pub fn max_results(&self) -> usize  { self.max_results }

    /// First day of the overdue window, clamped to the first supported day
    pub fn lookback_start(&self, today: DateKey) -> DateKey {
        today.saturating_sub_days(self.lookback_days)
    }

    /// Returns at most `max_results` entries, overdue ones first.
    ///
    /// Rest days are suggested like any other entry. Upcoming workouts are suggested regardless of
    /// completion records, since they cannot have been done yet.
    pub fn resolve(&self, store: &ScheduleStore, completions: &[CompletionRecord], today: DateKey) -> Vec<ResolvedWorkoutEntry> {
        if self.max_results == 0 {
            return Vec::new();
        }
        let completed = CompletionIndex::new(completions);

        let lookback_start = self.lookback_start(today);

        let mut overdue = Vec::new();
        for (date, workouts) in store.entries_between(lookback_start, today) {
            for workout in workouts {
                if completed.is_completed(workout.workout_id(), &date) {
                    continue;
                }
                overdue.push(ResolvedWorkoutEntry {
                    workout_id: workout.workout_id().to_string(),
                    scheduled_date: date,
                    is_overdue: true,
                });
            }
        }

        let mut upcoming = Vec::new();
        let remaining = self.max_results.saturating_sub(overdue.len());
        let first_future = if remaining > 0 { today.checked_add_days(1) } else { None };
        if let Some(first_future) = first_future {
            let lookahead_end = today.saturating_add_days(self.lookahead_days);

            'scan: for (date, workouts) in store.entries_between(first_future, lookahead_end) {
                for workout in workouts {
                    if upcoming.len() == remaining {
                        break 'scan;
                    }
                    upcoming.push(ResolvedWorkoutEntry {
                        workout_id: workout.workout_id().to_string(),
                        scheduled_date: date,
                        is_overdue: false,
                    });
                }
            }
        }

        // Both lists are built in store order. The sorts are stable, so same-day ties keep that order
        overdue.sort_by_key(|e| e.scheduled_date);
        overdue.truncate(self.max_results);
        upcoming.sort_by_key(|e| e.scheduled_date);

        log::debug!("Resolved {} overdue and {} upcoming workouts around {}", overdue.len(), upcoming.len(), today);
        overdue.extend(upcoming);
        overdue
    }
}
