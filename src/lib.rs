//! This crate schedules the workouts of a training plan.
//!
//! A plan is a short list of recurring workout days (e.g. push/pull/legs). The [`compiler`] lays it out on a
//! calendar as a [`ScheduleStore`], unless the plan carries its own explicit schedule.
//!
//! From a schedule and the user's completion records, this crate computes:
//! * the workouts to do next, overdue ones first, with the [`resolver`]
//! * calendar rows for a day range, a week or a month, with the [`projector`]
//!
//! Everything above is pure and synchronous, with "today" always passed by the caller. \
//! Storage stays outside of this crate, behind the [`PlanSource`](traits::PlanSource) trait. A JSON-file
//! implementation is provided in the [`cache`] module, and a [`Planner`] combines a source with the components above.

pub mod error;
pub use error::{Error, Result};

pub mod date_key;
pub use date_key::{DateKey, DateRange};
pub mod workout;
pub use workout::{CompletionIndex, CompletionRecord, WorkoutRef};
pub mod store;
pub use store::ScheduleStore;

pub mod compiler;
pub use compiler::{ExerciseBlueprint, ScheduleCompiler, WorkoutDayTemplate};
pub mod resolver;
pub use resolver::{NextWorkoutResolver, ResolvedWorkoutEntry};
pub mod projector;
pub use projector::{CalendarEvent, CalendarEventProjector, EventStatus};
pub mod plan;
pub use plan::{PlanId, WorkoutPlan};

pub mod color;
pub mod config;
pub use config::ScheduleSettings;

pub mod traits;
pub mod cache;
pub mod planner;
pub use planner::Planner;

pub mod utils;
