use std::collections::HashMap;

use async_trait::async_trait;
use mealplanner_shared::{
    Error, Result,
    mealplan::{PlanDocument, PlanParameters},
};
use tokio::sync::RwLock;

use crate::recompute;

/// Where plans live between sessions.
///
/// Only the parameters of an edited plan are written back: days and meals
/// are re-derivable from the generated document with [`recompute`].
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn fetch_plan(&self, id: &str) -> Result<Option<PlanDocument>>;

    async fn persist_parameters(&self, id: &str, params: &PlanParameters) -> Result<()>;

    async fn delete_plan(&self, id: &str) -> Result<()>;

    async fn list_plans(&self, user_id: &str) -> Result<Vec<PlanDocument>>;

    async fn insert_plan(&self, plan: PlanDocument) -> Result<()>;
}

struct StoredPlan {
    baseline: PlanDocument,
    parameters: PlanParameters,
}

impl StoredPlan {
    fn current(&self) -> Result<PlanDocument> {
        if self.parameters == self.baseline.parameters {
            return Ok(self.baseline.to_owned());
        }

        recompute(&self.baseline, &self.parameters)
    }
}

/// Process-local store keeping each generated document next to its latest
/// persisted parameters.
#[derive(Default)]
pub struct MemoryPlanStore {
    plans: RwLock<HashMap<String, StoredPlan>>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn fetch_plan(&self, id: &str) -> Result<Option<PlanDocument>> {
        let plans = self.plans.read().await;

        plans.get(id).map(StoredPlan::current).transpose()
    }

    async fn persist_parameters(&self, id: &str, params: &PlanParameters) -> Result<()> {
        let mut plans = self.plans.write().await;
        let Some(plan) = plans.get_mut(id) else {
            return Err(Error::NotFound(id.to_owned()));
        };

        plan.parameters = params.to_owned();

        Ok(())
    }

    async fn delete_plan(&self, id: &str) -> Result<()> {
        match self.plans.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(id.to_owned())),
        }
    }

    async fn list_plans(&self, user_id: &str) -> Result<Vec<PlanDocument>> {
        let plans = self.plans.read().await;
        let mut owned = plans
            .values()
            .filter(|plan| plan.baseline.user_id == user_id)
            .map(StoredPlan::current)
            .collect::<Result<Vec<_>>>()?;

        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        Ok(owned)
    }

    async fn insert_plan(&self, plan: PlanDocument) -> Result<()> {
        let mut plans = self.plans.write().await;
        if plans.contains_key(&plan.id) {
            return Err(Error::Store(format!("plan {} already exists", plan.id)));
        }

        plans.insert(
            plan.id.to_owned(),
            StoredPlan {
                parameters: plan.parameters.to_owned(),
                baseline: plan,
            },
        );

        Ok(())
    }
}
