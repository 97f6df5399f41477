//! This module provides a local cache for plans and completion records

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::{Error, Result};
use crate::plan::{PlanId, WorkoutPlan};
use crate::traits::PlanSource;
use crate::workout::CompletionRecord;


/// A [`PlanSource`] that stores its data in a local JSON file
#[derive(Debug, PartialEq)]
pub struct Cache {
    backing_file: PathBuf,
    data: CachedData,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    plans: HashMap<PlanId, WorkoutPlan>,
    completions: Vec<CompletionRecord>,
}

impl Cache {
    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let data = serde_json::from_reader(file)?;

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize a cache with the default contents
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: CachedData::default(),
        }
    }

    /// Get the path to the backing file
    pub fn backing_file(&self) -> &Path {
        &self.backing_file
    }

    /// Store the current Cache to its backing file
    pub fn save_to_file(&self) -> Result<()> {
        let path = &self.backing_file;
        let file = std::fs::File::create(path).map_err(|err| {
            log::warn!("Unable to save file {:?}: {}", path, err);
            err
        })?;
        serde_json::to_writer(file, &self.data)?;
        log::debug!("Saved {} plans and {} completions to {:?}", self.data.plans.len(), self.data.completions.len(), path);
        Ok(())
    }

    /// Number of stored plans
    pub fn plan_count(&self) -> usize {
        self.data.plans.len()
    }

    /// Remove a plan. Fails with [`Error::UnknownPlan`] if there is no such plan
    pub fn delete_plan(&mut self, id: &PlanId) -> Result<WorkoutPlan> {
        self.data.plans.remove(id).ok_or_else(|| Error::UnknownPlan(id.clone()))
    }
}

#[async_trait]
impl PlanSource for Cache {
    async fn get_plans(&self) -> Result<Vec<WorkoutPlan>> {
        let mut plans: Vec<WorkoutPlan> = self.data.plans.values().cloned().collect();
        plans.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(plans)
    }

    async fn get_plan(&self, id: &PlanId) -> Result<Option<WorkoutPlan>> {
        Ok(self.data.plans.get(id).cloned())
    }

    async fn save_plan(&mut self, plan: WorkoutPlan) -> Result<()> {
        self.data.plans.insert(plan.id().clone(), plan);
        Ok(())
    }

    async fn get_completions(&self, start: DateKey, end: DateKey) -> Result<Vec<CompletionRecord>> {
        if end < start {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(self.data.completions.iter()
            .filter(|r| start <= r.scheduled_date && r.scheduled_date <= end)
            .cloned()
            .collect())
    }

    async fn record_completion(&mut self, record: CompletionRecord) -> Result<()> {
        // One record per scheduled occurrence: a new one replaces the previous one
        self.data.completions.retain(|r| r.matches(&record.workout_id, &record.scheduled_date) == false);
        self.data.completions.push(record);
        Ok(())
    }
}
