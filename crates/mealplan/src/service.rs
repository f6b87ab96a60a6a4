use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::Utc;
use mealplanner_shared::{
    Error, Result, Session,
    mealplan::{PlanContent, PlanDocument, PlanParameters},
};
use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

use crate::{
    DEFAULT_RECENT_PLANS, DashboardSummary, GenerationThrottle, PlanStore, dashboard, plan_title,
};

pub const DEFAULT_PREFERENCES: &str = "No specific preferences";
pub const DEFAULT_GENERATION_COOLDOWN: Duration = Duration::from_secs(10);

/// Opaque producer of plan content, typically a language model.
///
/// Returns the raw model text; parsing and validation happen here.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, params: &PlanParameters) -> anyhow::Result<String>;
}

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct GenerateInput {
    #[validate(range(min = 1, max = 30))]
    pub days: u32,
    #[validate(range(min = 1, max = 10))]
    pub servings: u32,
    #[validate(range(min = 500, max = 5000))]
    pub target_calories: u32,
    #[serde(default)]
    pub preferences: Option<String>,
}

impl Default for GenerateInput {
    fn default() -> Self {
        Self {
            days: 7,
            servings: 2,
            target_calories: 2000,
            preferences: None,
        }
    }
}

impl GenerateInput {
    fn into_parameters(self) -> PlanParameters {
        PlanParameters {
            days: self.days,
            servings: self.servings,
            target_calories: self.target_calories,
            preferences: self
                .preferences
                .unwrap_or_else(|| DEFAULT_PREFERENCES.to_owned()),
        }
    }
}

/// Owner-scoped entry points for generating, reading and removing plans.
pub struct PlanService<S: PlanStore, G: Generator> {
    store: Arc<S>,
    generator: G,
    throttle: GenerationThrottle,
    recent_plans_limit: usize,
}

impl<S: PlanStore, G: Generator> PlanService<S, G> {
    pub fn new(store: Arc<S>, generator: G) -> Self {
        Self {
            store,
            generator,
            throttle: GenerationThrottle::new(DEFAULT_GENERATION_COOLDOWN),
            recent_plans_limit: DEFAULT_RECENT_PLANS,
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.throttle = GenerationThrottle::new(cooldown);
        self
    }

    pub fn with_recent_plans_limit(mut self, limit: usize) -> Self {
        self.recent_plans_limit = limit;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    #[tracing::instrument(skip(self, session, input), fields(user_id = %session.user_id))]
    pub async fn generate(&self, session: &Session, input: GenerateInput) -> Result<PlanDocument> {
        input.validate()?;
        self.throttle.check(&session.user_id, Instant::now())?;

        let parameters = input.into_parameters();
        let raw = self
            .generator
            .generate(&parameters)
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        let content =
            PlanContent::from_model_output(&raw, parameters.days)?.normalized(&parameters);
        let title = match content.title.trim() {
            "" => plan_title(&parameters),
            title => title.to_owned(),
        };

        let plan = PlanDocument {
            id: Ulid::new().to_string(),
            user_id: session.user_id.to_owned(),
            title,
            parameters,
            summary: content.summary,
            days: content.days,
            created_at: Utc::now(),
        };

        self.store.insert_plan(plan.to_owned()).await?;

        tracing::info!(plan_id = %plan.id, days = plan.days.len(), "meal plan generated");

        Ok(plan)
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<PlanDocument> {
        fetch_owned(self.store.as_ref(), session, id).await
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<PlanDocument>> {
        self.store.list_plans(&session.user_id).await
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        fetch_owned(self.store.as_ref(), session, id).await?;
        self.store.delete_plan(id).await?;

        tracing::info!(plan_id = id, user_id = %session.user_id, "meal plan deleted");

        Ok(())
    }

    pub async fn dashboard(&self, session: &Session) -> Result<DashboardSummary> {
        let plans = self.list(session).await?;

        Ok(dashboard(&plans, self.recent_plans_limit))
    }
}

/// Fetches `id`, rejecting plans owned by someone other than `session`.
pub(crate) async fn fetch_owned<S: PlanStore + ?Sized>(
    store: &S,
    session: &Session,
    id: &str,
) -> Result<PlanDocument> {
    let Some(plan) = store.fetch_plan(id).await? else {
        return Err(Error::NotFound(id.to_owned()));
    };

    if !session.owns(&plan.user_id) {
        tracing::warn!(plan_id = id, user_id = %session.user_id, "plan owned by another user");
        return Err(Error::Forbidden);
    }

    Ok(plan)
}
