mod check;
mod recompute;
mod stats;

pub use check::*;
pub use recompute::*;
pub use stats::*;

use std::path::Path;

use anyhow::{Context, Result};
use mealplanner_shared::mealplan::PlanDocument;
use serde::Serialize;

/// Reads a plan document from a JSON file.
pub async fn read_plan(path: &Path) -> Result<PlanDocument> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("{} is not a plan document", path.display()))
}

/// Writes `value` as pretty JSON to `output`, or to stdout when absent.
pub async fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    match output {
        Some(path) => tokio::fs::write(path, format!("{json}\n"))
            .await
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}
