use std::path::Path;

use anyhow::Result;
use clap::Args;
use mealplanner_shared::mealplan::{PlanDocument, PlanParameters};

/// New parameters for an existing plan.
#[derive(Args, Clone, Debug)]
pub struct EditArgs {
    /// Number of days
    #[arg(long)]
    pub days: u32,

    /// Servings per meal
    #[arg(long)]
    pub servings: u32,

    /// Daily calorie target
    #[arg(long = "calories")]
    pub target_calories: u32,

    /// Dietary preferences, empty keeps the plan's notes
    #[arg(long, default_value = "")]
    pub preferences: String,
}

impl From<EditArgs> for PlanParameters {
    fn from(args: EditArgs) -> Self {
        Self {
            days: args.days,
            servings: args.servings,
            target_calories: args.target_calories,
            preferences: args.preferences,
        }
    }
}

#[tracing::instrument(skip(params), fields(days = params.days, calories = params.target_calories))]
pub async fn recompute(plan: &Path, params: PlanParameters) -> Result<PlanDocument> {
    let original = super::read_plan(plan).await?;
    let next = mealplanner_mealplan::recompute(&original, &params)?;

    tracing::info!(plan_id = %next.id, days = next.days.len(), "plan recomputed");

    Ok(next)
}
