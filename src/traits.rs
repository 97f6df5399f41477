use async_trait::async_trait;

use crate::date_key::DateKey;
use crate::error::Result;
use crate::plan::{PlanId, WorkoutPlan};
use crate::workout::CompletionRecord;

/// Where plans and completion records are stored (a remote backend, a local cache...)
#[async_trait]
pub trait PlanSource {
    /// Returns every plan of the current user
    /// This function may trigger an update (that can be a long process, or that can even fail, e.g. in case of a remote server)
    async fn get_plans(&self) -> Result<Vec<WorkoutPlan>>;

    /// Returns the plan with this id, if any
    async fn get_plan(&self, id: &PlanId) -> Result<Option<WorkoutPlan>> {
        let plans = self.get_plans().await?;
        Ok(plans.into_iter().find(|p| p.id() == id))
    }

    /// Insert a plan, or replace the plan that has the same id
    async fn save_plan(&mut self, plan: WorkoutPlan) -> Result<()>;

    /// Returns the completion records whose scheduled date is between `start` and `end` (both included)
    async fn get_completions(&self, start: DateKey, end: DateKey) -> Result<Vec<CompletionRecord>>;

    /// Store a completion record
    async fn record_completion(&mut self, record: CompletionRecord) -> Result<()>;
}
