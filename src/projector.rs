//! Calendar views of a schedule
//!
//! A projection expands a [`ScheduleStore`] into one [`CalendarEvent`] per scheduled workout of a date range,
//! annotated with what the completion records say about it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_key::{DateKey, DateRange};
use crate::error::{Error, Result};
use crate::plan::PlanId;
use crate::store::ScheduleStore;
use crate::workout::{CompletionIndex, CompletionRecord, WorkoutRef};

/// What is known about a calendar event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventStatus {
    /// A completion record says it has been done
    Completed,
    /// A completion record exists, but says it was not finished
    Missed,
    /// No completion record at all
    NotAttempted,
}

/// A scheduled workout, ready to be displayed in a calendar cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub plan_id: PlanId,
    pub workout_id: String,
    pub scheduled_date: DateKey,
    /// Monday=1 to Sunday=7, always derived from `scheduled_date`
    pub day_of_week: u32,
    pub sort_order: i32,
    pub is_rest_day: bool,
    /// `None` when no completion record exists for this occurrence
    pub is_completed: Option<bool>,
    pub completion_date: Option<DateTime<Utc>>,
    pub notes: String,
    pub calendar_color: Option<String>,
}

impl CalendarEvent {
    pub fn status(&self) -> EventStatus {
        match self.is_completed {
            Some(true) => EventStatus::Completed,
            Some(false) => EventStatus::Missed,
            None => EventStatus::NotAttempted,
        }
    }
}

/// Builds calendar events for one plan
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarEventProjector {
    plan_id: PlanId,
    default_color: Option<String>,
}

impl CalendarEventProjector {
    pub fn new(plan_id: PlanId) -> Self {
        Self { plan_id, default_color: None }
    }

    /// Color used for workouts that do not carry their own
    pub fn with_default_color(mut self, color: Option<String>) -> Self {
        self.default_color = color;
        self
    }

    pub fn plan_id(&self) -> &PlanId {
        &self.plan_id
    }

    /// One event per scheduled workout between `start` and `end` (both included), in `(date, sort order)` order.
    ///
    /// Fails with [`Error::InvalidRange`] when `end < start`.
    pub fn project(&self, store: &ScheduleStore, start: DateKey, end: DateKey, completions: &[CompletionRecord]) -> Result<Vec<CalendarEvent>> {
        let range = DateRange::new(start, end)?;
        let index = CompletionIndex::new(completions);

        let events: Vec<CalendarEvent> = store.entries_between(range.start(), range.end())
            .flat_map(|(date, workouts)| {
                workouts.iter().map(move |w| (date, w))
            })
            .map(|(date, workout)| self.build_event(date, workout, &index))
            .collect();

        log::debug!("Projected {} events for plan {} between {} and {}", events.len(), self.plan_id, start, end);
        Ok(events)
    }

    /// The Monday-to-Sunday week that contains `day`
    pub fn project_week(&self, store: &ScheduleStore, day: DateKey, completions: &[CompletionRecord]) -> Result<Vec<CalendarEvent>> {
        let monday = day.week_start()
            .ok_or_else(|| Error::invalid_date(day.to_string(), "week starts before the first supported day"))?;
        let sunday = monday.checked_add_days(6)
            .ok_or_else(|| Error::invalid_date(day.to_string(), "week ends after the last supported day"))?;
        self.project(store, monday, sunday, completions)
    }

    /// A whole calendar month
    pub fn project_month(&self, store: &ScheduleStore, year: i32, month: u32, completions: &[CompletionRecord]) -> Result<Vec<CalendarEvent>> {
        let first = DateKey::first_of_month(year, month)?;
        let last = DateKey::last_of_month(year, month)?;
        self.project(store, first, last, completions)
    }

    fn build_event(&self, date: DateKey, workout: &WorkoutRef, index: &CompletionIndex) -> CalendarEvent {
        let record = index.get(workout.workout_id(), &date);
        let calendar_color = workout.calendar_color()
            .map(|c| c.to_string())
            .or_else(|| self.default_color.clone());

        CalendarEvent {
            plan_id: self.plan_id.clone(),
            workout_id: workout.workout_id().to_string(),
            scheduled_date: date,
            day_of_week: date.iso_weekday(),
            sort_order: workout.sort_order(),
            is_rest_day: workout.is_rest_day(),
            is_completed: record.map(|r| r.is_completed),
            completion_date: record.and_then(|r| r.completed_at),
            notes: workout.notes().to_string(),
            calendar_color,
        }
    }
}
