//! Scheduled workout references and completion records

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;

/// A workout to perform on a given day of a schedule
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWorkoutRef")]
pub struct WorkoutRef {
    workout_id: String,
    sort_order: i32,
    is_rest_day: bool,

    /// Free text shown next to the calendar entry
    notes: String,
    /// Display color, passed through as-is (see [`crate::color`] for creation-time validation)
    calendar_color: Option<String>,
}

impl WorkoutRef {
    pub fn new<S: Into<String>>(workout_id: S) -> Self {
        Self {
            workout_id: workout_id.into(),
            sort_order: 0,
            is_rest_day: false,
            notes: String::new(),
            calendar_color: None,
        }
    }

    /// A rest day entry. It is scheduled, projected and suggested like any other workout
    pub fn rest_day<S: Into<String>>(workout_id: S) -> Self {
        Self { is_rest_day: true, ..Self::new(workout_id) }
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_calendar_color<S: Into<String>>(mut self, color: S) -> Self {
        self.calendar_color = Some(color.into());
        self
    }

    pub fn workout_id(&self) -> &str  { &self.workout_id }
    pub fn sort_order(&self) -> i32   { self.sort_order }
    pub fn is_rest_day(&self) -> bool { self.is_rest_day }
    pub fn notes(&self) -> &str       { &self.notes }
    pub fn calendar_color(&self) -> Option<&str> { self.calendar_color.as_deref() }
}

/// Schedules stored by older clients only contain workout ids, newer ones contain full objects
#[derive(Deserialize)]
#[serde(untagged)]
enum RawWorkoutRef {
    Id(String),
    Full {
        workout_id: String,
        #[serde(default)]
        sort_order: i32,
        #[serde(default)]
        is_rest_day: bool,
        #[serde(default)]
        notes: String,
        #[serde(default)]
        calendar_color: Option<String>,
    },
}

impl From<RawWorkoutRef> for WorkoutRef {
    fn from(raw: RawWorkoutRef) -> Self {
        match raw {
            RawWorkoutRef::Id(workout_id) => WorkoutRef::new(workout_id),
            RawWorkoutRef::Full { workout_id, sort_order, is_rest_day, notes, calendar_color } => {
                WorkoutRef { workout_id, sort_order, is_rest_day, notes, calendar_color }
            },
        }
    }
}



/// A workout occurrence that has been executed (or explicitly skipped)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub workout_id: String,
    pub scheduled_date: DateKey,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
}

impl CompletionRecord {
    /// A workout that has been finished at `completed_at`
    pub fn completed<S: Into<String>>(workout_id: S, scheduled_date: DateKey, completed_at: DateTime<Utc>) -> Self {
        Self {
            workout_id: workout_id.into(),
            scheduled_date,
            completed_at: Some(completed_at),
            is_completed: true,
        }
    }

    /// A workout that has been attempted (or skipped), but not finished
    pub fn not_completed<S: Into<String>>(workout_id: S, scheduled_date: DateKey) -> Self {
        Self {
            workout_id: workout_id.into(),
            scheduled_date,
            completed_at: None,
            is_completed: false,
        }
    }

    /// Whether this record is about the given scheduled occurrence
    pub fn matches(&self, workout_id: &str, date: &DateKey) -> bool {
        self.workout_id == workout_id && self.scheduled_date == *date
    }
}


/// Look up completion records by `(workout_id, scheduled_date)`
///
/// When several records exist for the same occurrence, a completed one wins over a non-completed one,
/// and among completed ones the latest `completed_at` wins.
pub struct CompletionIndex<'a> {
    by_date: HashMap<DateKey, HashMap<&'a str, &'a CompletionRecord>>,
}

impl<'a> CompletionIndex<'a> {
    pub fn new(records: &'a [CompletionRecord]) -> Self {
        let mut by_date: HashMap<DateKey, HashMap<&'a str, &'a CompletionRecord>> = HashMap::new();
        for record in records {
            let day = by_date.entry(record.scheduled_date).or_default();
            let replace = match day.get(record.workout_id.as_str()) {
                None => true,
                Some(existing) => supersedes(record, existing),
            };
            if replace {
                day.insert(record.workout_id.as_str(), record);
            }
        }
        Self { by_date }
    }

    /// The record that describes this occurrence, if any
    pub fn get(&self, workout_id: &str, date: &DateKey) -> Option<&'a CompletionRecord> {
        self.by_date.get(date)
            .and_then(|day| day.get(workout_id))
            .copied()
    }

    /// Whether this occurrence has been finished
    pub fn is_completed(&self, workout_id: &str, date: &DateKey) -> bool {
        self.get(workout_id, date).map(|r| r.is_completed).unwrap_or(false)
    }

    /// Number of distinct occurrences
    pub fn len(&self) -> usize {
        self.by_date.values().map(|day| day.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

fn supersedes(candidate: &CompletionRecord, existing: &CompletionRecord) -> bool {
    match (candidate.is_completed, existing.is_completed) {
        (true, false) => true,
        (false, true) => false,
        _ => candidate.completed_at > existing.completed_at,
    }
}
