use std::path::PathBuf;

use anyhow::Result;
use mealplanner_mealplan::{DashboardSummary, dashboard};

#[tracing::instrument(skip(config))]
pub async fn stats(config: &crate::config::Config, plans: &[PathBuf]) -> Result<DashboardSummary> {
    let mut documents = Vec::with_capacity(plans.len());
    for path in plans {
        documents.push(super::read_plan(path).await?);
    }

    let summary = dashboard(&documents, config.planner.recent_plans_limit);

    tracing::info!(
        plans = summary.statistics.total_meal_plans,
        days = summary.statistics.total_days_planned,
        "statistics computed"
    );

    Ok(summary)
}
