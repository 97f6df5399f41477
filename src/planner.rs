//! This module ties a [`PlanSource`] to the scheduling components
//!
//! The source provides plans and completion records, the [`Planner`] turns them into "next workouts"
//! lists and calendar events, and writes rescheduled plans back.

use chrono::{DateTime, Utc};

use crate::config::ScheduleSettings;
use crate::date_key::DateKey;
use crate::error::{Error, Result};
use crate::plan::{PlanId, WorkoutPlan};
use crate::projector::CalendarEvent;
use crate::resolver::ResolvedWorkoutEntry;
use crate::traits::PlanSource;
use crate::workout::CompletionRecord;

/// Schedule queries and mutations on top of a data source
#[derive(Debug)]
pub struct Planner<S>
where
    S: PlanSource,
{
    source: S,
    settings: ScheduleSettings,
}

impl<S> Planner<S>
where
    S: PlanSource + Send + Sync,
{
    pub fn new(source: S, settings: ScheduleSettings) -> Self {
        Self { source, settings }
    }

    /// Returns the data source
    pub fn source(&self) -> &S { &self.source }
    /// Returns the data source
    pub fn source_mut(&mut self) -> &mut S { &mut self.source }

    pub fn settings(&self) -> &ScheduleSettings { &self.settings }

    /// The active plan that has been updated most recently
    pub async fn active_plan(&self) -> Result<Option<WorkoutPlan>> {
        let plans = self.source.get_plans().await?;
        Ok(plans.into_iter()
            .filter(|p| p.is_active())
            .max_by(|a, b| a.updated_at().cmp(b.updated_at())))
    }

    /// The workouts the user should do next, overdue ones first.
    ///
    /// Errors from the source (e.g. an expired session on a remote backend) are logged and give an empty list,
    /// exactly like a plan with nothing scheduled.
    pub async fn next_workouts(&self, today: DateKey) -> Vec<ResolvedWorkoutEntry> {
        match self.try_next_workouts(today).await {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Unable to resolve next workouts: {}", err);
                Vec::new()
            }
        }
    }

    async fn try_next_workouts(&self, today: DateKey) -> Result<Vec<ResolvedWorkoutEntry>> {
        let plan = match self.active_plan().await? {
            None => {
                log::info!("No active plan, nothing to suggest");
                return Ok(Vec::new());
            },
            Some(plan) => plan,
        };
        let store = plan.schedule_store(&self.settings.compiler());

        let resolver = self.settings.resolver();
        let completions = self.source.get_completions(resolver.lookback_start(today), today).await?;

        Ok(resolver.resolve(&store, &completions, today))
    }

    /// Calendar events of the active plan between `start` and `end` (both included)
    pub async fn calendar_events(&self, start: DateKey, end: DateKey) -> Result<Vec<CalendarEvent>> {
        if end < start {
            return Err(Error::InvalidRange { start, end });
        }
        let plan = match self.active_plan().await? {
            None => return Ok(Vec::new()),
            Some(plan) => plan,
        };
        let store = plan.schedule_store(&self.settings.compiler());
        let completions = self.source.get_completions(start, end).await?;
        plan.projector().project(&store, start, end, &completions)
    }

    /// Move a workout of a plan to another day, and save the plan.
    ///
    /// A plan that only has a compiled schedule gets it materialized as its explicit schedule first.
    /// Returns `false` (and saves nothing) when the workout is not scheduled on `from`.
    pub async fn reschedule(&mut self, plan_id: &PlanId, workout_id: &str, from: DateKey, to: DateKey) -> Result<bool> {
        let mut plan = self.source.get_plan(plan_id).await?
            .ok_or_else(|| Error::UnknownPlan(plan_id.clone()))?;

        let mut store = plan.schedule_store(&self.settings.compiler());
        if store.reschedule_workout(&from, to, workout_id) == false {
            log::info!("{} is not scheduled on {} in plan {}", workout_id, from, plan_id);
            return Ok(false);
        }
        plan.set_schedule(store);
        self.source.save_plan(plan).await?;
        log::info!("Rescheduled {} from {} to {} in plan {}", workout_id, from, to, plan_id);
        Ok(true)
    }

    /// Record that a scheduled workout has been finished
    pub async fn complete_workout(&mut self, workout_id: &str, scheduled_date: DateKey, completed_at: DateTime<Utc>) -> Result<()> {
        self.source.record_completion(CompletionRecord::completed(workout_id, scheduled_date, completed_at)).await
    }

    /// Record that a scheduled workout has been skipped
    pub async fn skip_workout(&mut self, workout_id: &str, scheduled_date: DateKey) -> Result<()> {
        self.source.record_completion(CompletionRecord::not_completed(workout_id, scheduled_date)).await
    }
}
