//! Workout plans: recurring workout days, plus an optional explicit schedule

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compiler::{ScheduleCompiler, WorkoutDayTemplate};
use crate::date_key::DateKey;
use crate::projector::CalendarEventProjector;
use crate::store::ScheduleStore;

/// Identifier of a plan
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// Generate a random PlanId.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PlanId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for PlanId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for PlanId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// A user's training program
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    id: PlanId,
    name: String,
    #[serde(default)]
    description: String,
    /// First day of the compiled schedule
    start_date: DateKey,
    /// The recurring days, in order
    #[serde(default)]
    workout_days: Vec<WorkoutDayTemplate>,
    /// A schedule that has been materialized (and possibly edited by the user).
    /// When missing or empty, the schedule is compiled from `workout_days`
    #[serde(default)]
    schedule: Option<ScheduleStore>,
    #[serde(default)]
    calendar_color: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkoutPlan {
    /// Create a brand new, active plan, with a random id
    pub fn new<S: Into<String>>(name: S, start_date: DateKey, workout_days: Vec<WorkoutDayTemplate>) -> Self {
        let now = Utc::now();
        Self {
            id: PlanId::random(),
            name: name.into(),
            description: String::new(),
            start_date,
            workout_days,
            schedule: None,
            calendar_color: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: PlanId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_calendar_color<S: Into<String>>(mut self, color: S) -> Self {
        self.calendar_color = Some(color.into());
        self
    }

    pub fn with_schedule(mut self, schedule: ScheduleStore) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn id(&self) -> &PlanId           { &self.id }
    pub fn name(&self) -> &str            { &self.name }
    pub fn description(&self) -> &str     { &self.description }
    pub fn start_date(&self) -> DateKey   { self.start_date }
    pub fn is_active(&self) -> bool       { self.is_active }
    pub fn created_at(&self) -> &DateTime<Utc> { &self.created_at }
    pub fn updated_at(&self) -> &DateTime<Utc> { &self.updated_at }
    pub fn workout_days(&self) -> &[WorkoutDayTemplate] { &self.workout_days }
    pub fn explicit_schedule(&self) -> Option<&ScheduleStore> { self.schedule.as_ref() }
    pub fn calendar_color(&self) -> Option<&str> { self.calendar_color.as_deref() }

    /// The workout day template with this id, if it belongs to this plan
    pub fn template(&self, template_id: &str) -> Option<&WorkoutDayTemplate> {
        self.workout_days.iter().find(|t| t.id == template_id)
    }

    /// The schedule of this plan: the explicit one if it has entries, the compiled template otherwise
    pub fn schedule_store(&self, compiler: &ScheduleCompiler) -> ScheduleStore {
        match &self.schedule {
            Some(store) if store.is_empty() == false => store.clone(),
            _ => compiler.compile(&self.workout_days, self.start_date),
        }
    }

    /// A projector that labels events with this plan's id and color
    pub fn projector(&self) -> CalendarEventProjector {
        CalendarEventProjector::new(self.id.clone())
            .with_default_color(self.calendar_color.clone())
    }

    /// Replace the explicit schedule.
    /// This updates its "updated at" field
    pub fn set_schedule(&mut self, schedule: ScheduleStore) {
        self.schedule = Some(schedule);
        self.touch();
    }

    /// Go back to the compiled template schedule
    pub fn clear_schedule(&mut self) {
        self.schedule = None;
        self.touch();
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.touch();
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::ExerciseBlueprint;
    use crate::workout::WorkoutRef;

    fn ppl() -> Vec<WorkoutDayTemplate> {
        vec![
            WorkoutDayTemplate::new("push-workout", "Push").with_exercise(ExerciseBlueprint {
                name: "Bench press".to_string(), sets: 4, reps: 8, weight: Some(60.0), rest_seconds: Some(120),
            }),
            WorkoutDayTemplate::new("pull-workout", "Pull"),
            WorkoutDayTemplate::new("legs-workout", "Legs"),
        ]
    }

    #[test]
    fn compiled_schedule_by_default() {
        let plan = WorkoutPlan::new("PPL", DateKey::new(2024, 1, 1).unwrap(), ppl());
        let store = plan.schedule_store(&ScheduleCompiler::new(1));
        assert_eq!(store.len(), 3);
        assert_eq!(plan.template("push-workout").unwrap().exercises.len(), 1);
        assert!(plan.template("rest").is_none());
    }

    #[test]
    fn explicit_schedule_wins_unless_empty() {
        let start = DateKey::new(2024, 1, 1).unwrap();
        let mut explicit = ScheduleStore::new();
        explicit.add_workout(DateKey::new(2024, 1, 5).unwrap(), WorkoutRef::new("legs-workout"));

        let mut plan = WorkoutPlan::new("PPL", start, ppl()).with_schedule(explicit.clone());
        assert_eq!(plan.schedule_store(&ScheduleCompiler::default()), explicit);

        plan.set_schedule(ScheduleStore::new());
        assert_eq!(plan.schedule_store(&ScheduleCompiler::new(1)).len(), 3);
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(PlanId::random(), PlanId::random());
    }

    #[test]
    fn serde_plan() {
        let plan = WorkoutPlan::new("PPL", DateKey::new(2024, 1, 1).unwrap(), ppl())
            .with_calendar_color("#1E88E5");
        let json = serde_json::to_string(&plan).unwrap();
        let back: WorkoutPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn plan_with_legacy_schedule_blob() {
        let plan: WorkoutPlan = serde_json::from_str(r#"{
            "id": "abc",
            "name": "Legacy",
            "start_date": "2024-01-01",
            "schedule": {"2024-01-03": ["push-workout"], "2024-01-04": ["pull-workout", "core"]},
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#).unwrap();
        assert_eq!(plan.id(), &PlanId::from("abc"));
        assert!(plan.workout_days().is_empty());
        let store = plan.schedule_store(&ScheduleCompiler::default());
        assert_eq!(store.workouts_for_date(&DateKey::new(2024, 1, 4).unwrap()).len(), 2);
    }
}
