//! Support for library configuration options

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compiler::{ScheduleCompiler, DEFAULT_WEEKS_TO_GENERATE};
use crate::error::Result;
use crate::resolver::{NextWorkoutResolver, DEFAULT_LOOKAHEAD_DAYS, DEFAULT_LOOKBACK_DAYS, DEFAULT_MAX_RESULTS};

/// Tunables of the scheduling components.
///
/// Every field is optional in a settings file, missing ones keep their default value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// How many weeks are generated when a plan has no explicit schedule
    pub weeks_to_generate: u32,
    /// How far back unfinished workouts are still suggested
    pub lookback_days: u32,
    /// How far ahead upcoming workouts are looked for
    pub lookahead_days: u32,
    /// How many "next workouts" are suggested
    pub max_results: usize,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            weeks_to_generate: DEFAULT_WEEKS_TO_GENERATE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl ScheduleSettings {
    /// Load settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let settings = serde_json::from_reader(file)?;
        Ok(settings)
    }

    pub fn compiler(&self) -> ScheduleCompiler {
        ScheduleCompiler::new(self.weeks_to_generate)
    }

    pub fn resolver(&self) -> NextWorkoutResolver {
        NextWorkoutResolver::new(self.lookback_days, self.lookahead_days, self.max_results)
    }
}
