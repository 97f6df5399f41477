//! Turns a list of recurring workout days into a dated schedule

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::store::ScheduleStore;
use crate::workout::WorkoutRef;

/// How many weeks a compiled schedule covers, unless configured otherwise
pub const DEFAULT_WEEKS_TO_GENERATE: u32 = 4;

/// One exercise of a workout day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseBlueprint {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
}

/// A recurring workout day (e.g. "push", "pull" or "legs") of a plan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDayTemplate {
    /// Stable identifier, e.g. `push-workout`. This is the id that ends up in the schedule
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseBlueprint>,
}

impl WorkoutDayTemplate {
    pub fn new<S: Into<String>, N: Into<String>>(id: S, name: N) -> Self {
        Self { id: id.into(), name: name.into(), exercises: Vec::new() }
    }

    pub fn with_exercise(mut self, exercise: ExerciseBlueprint) -> Self {
        self.exercises.push(exercise);
        self
    }
}

/// Repeats a list of workout days week after week.
///
/// Template `i` is placed on `start + 7 * week + i`. More than 7 templates are not wrapped: the extra
/// ones simply land in the following week, on top of the next cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleCompiler {
    weeks_to_generate: u32,
}

impl Default for ScheduleCompiler {
    fn default() -> Self {
        Self { weeks_to_generate: DEFAULT_WEEKS_TO_GENERATE }
    }
}

impl ScheduleCompiler {
    pub fn new(weeks_to_generate: u32) -> Self {
        Self { weeks_to_generate }
    }

    pub fn weeks_to_generate(&self) -> u32 {
        self.weeks_to_generate
    }

    pub fn compile(&self, templates: &[WorkoutDayTemplate], start_date: DateKey) -> ScheduleStore {
        let mut store = ScheduleStore::new();
        for week in 0..self.weeks_to_generate {
            for (index, template) in templates.iter().enumerate() {
                let offset = week.checked_mul(7).and_then(|w| w.checked_add(index as u32));
                let date = match offset.and_then(|o| start_date.checked_add_days(o)) {
                    Some(d) => d,
                    None => {
                        log::warn!("Template {} of week {} falls after the last supported day, skipping it", template.id, week);
                        continue;
                    }
                };
                store.add_workout(date, WorkoutRef::new(template.id.clone()));
            }
        }
        log::debug!("Compiled {} templates over {} weeks from {} into {} days",
            templates.len(), self.weeks_to_generate, start_date, store.len());
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates(ids: &[&str]) -> Vec<WorkoutDayTemplate> {
        ids.iter().map(|id| WorkoutDayTemplate::new(*id, id.to_uppercase())).collect()
    }

    fn ids_on(store: &ScheduleStore, date: DateKey) -> Vec<&str> {
        store.workouts_for_date(&date).iter().map(|w| w.workout_id()).collect()
    }

    #[test]
    fn single_week() {
        let start = DateKey::new(2024, 1, 1).unwrap();
        let store = ScheduleCompiler::new(1).compile(&templates(&["push", "pull", "legs"]), start);
        assert_eq!(store.len(), 3);
        assert_eq!(ids_on(&store, start), vec!["push"]);
        assert_eq!(ids_on(&store, DateKey::new(2024, 1, 2).unwrap()), vec!["pull"]);
        assert_eq!(ids_on(&store, DateKey::new(2024, 1, 3).unwrap()), vec!["legs"]);
    }

    #[test]
    fn default_covers_four_weeks() {
        let start = DateKey::new(2024, 1, 1).unwrap();
        let store = ScheduleCompiler::default().compile(&templates(&["push", "pull", "legs"]), start);
        assert_eq!(store.len(), 12);
        assert_eq!(ids_on(&store, DateKey::new(2024, 1, 22).unwrap()), vec!["push"]);
        assert_eq!(store.last_date(), Some(DateKey::new(2024, 1, 24).unwrap()));
    }

    #[test]
    fn no_templates_is_an_empty_schedule() {
        let store = ScheduleCompiler::default().compile(&[], DateKey::new(2024, 1, 1).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn more_than_seven_templates_overlap_the_next_week() {
        let start = DateKey::new(2024, 1, 1).unwrap();
        let ids: Vec<String> = (0..9).map(|i| format!("day-{}", i)).collect();
        let refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
        let store = ScheduleCompiler::new(2).compile(&templates(&refs), start);
        // day-7 of week 0 and day-0 of week 1 share 2024-01-08
        assert_eq!(ids_on(&store, DateKey::new(2024, 1, 8).unwrap()), vec!["day-7", "day-0"]);
        assert_eq!(store.last_date(), Some(DateKey::new(2024, 1, 16).unwrap()));
    }

    #[test]
    fn compilation_is_deterministic() {
        let start = DateKey::new(2024, 2, 26).unwrap();
        let t = templates(&["upper", "lower", "upper", "rest"]);
        let a = ScheduleCompiler::new(6).compile(&t, start);
        let b = ScheduleCompiler::new(6).compile(&t, start);
        let end = DateKey::new(2024, 5, 1).unwrap();
        assert_eq!(a.workouts_in_range(start, end).unwrap(), b.workouts_in_range(start, end).unwrap());
    }

    #[test]
    fn stops_at_the_last_supported_day() {
        let start = DateKey::new(9999, 12, 30).unwrap();
        let store = ScheduleCompiler::new(2).compile(&templates(&["push", "pull", "legs"]), start);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn templates_deserialize_without_exercises() {
        let t: WorkoutDayTemplate = serde_json::from_str(r#"{"id": "push-workout", "name": "Push"}"#).unwrap();
        assert!(t.exercises.is_empty());
    }
}
