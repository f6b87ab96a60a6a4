use std::path::Path;

use anyhow::Result;
use mealplanner_shared::mealplan::Violation;

/// Broken consistency rules of the plan stored at `plan`.
#[tracing::instrument]
pub async fn check(plan: &Path) -> Result<Vec<Violation>> {
    let document = super::read_plan(plan).await?;
    let violations = document.violations();

    if violations.is_empty() {
        tracing::info!(plan_id = %document.id, "plan is consistent");
    } else {
        tracing::warn!(
            plan_id = %document.id,
            count = violations.len(),
            "plan is inconsistent"
        );
    }

    Ok(violations)
}
