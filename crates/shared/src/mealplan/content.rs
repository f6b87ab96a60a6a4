use serde::{Deserialize, Serialize};

use super::{Day, PlanParameters, PlanSummary};
use crate::Error;

const EXCERPT_LEN: usize = 200;

/// Plan body as produced by the generator, before it is owned by anyone.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlanContent {
    #[serde(default)]
    pub title: String,
    pub days: Vec<Day>,
    #[serde(default)]
    pub summary: PlanSummary,
}

impl PlanContent {
    /// Parses raw model text, tolerating a surrounding Markdown code fence.
    pub fn from_model_output(raw: &str, expected_days: u32) -> crate::Result<Self> {
        let body = strip_code_fence(raw);

        let content: PlanContent = serde_json::from_str(body).map_err(|e| {
            let excerpt: String = body.chars().take(EXCERPT_LEN).collect();
            Error::Generation(format!(
                "failed to parse model output as JSON: {e}. Response was: {excerpt}"
            ))
        })?;

        if content.days.len() != expected_days as usize {
            return Err(Error::Generation(format!(
                "expected {expected_days} days, got {}",
                content.days.len()
            )));
        }

        Ok(content)
    }

    /// Numbers days by position and restates every total against `params`,
    /// keeping the model's meals and dietary notes.
    pub fn normalized(mut self, params: &PlanParameters) -> Self {
        for (position, day) in self.days.iter_mut().enumerate() {
            day.day_number = position as u32 + 1;
            day.total_calories = params.target_calories;
        }

        let dietary_notes = self
            .summary
            .dietary_notes
            .take()
            .filter(|notes| !notes.trim().is_empty())
            .or_else(|| params.preferences().map(str::to_owned));

        self.summary = PlanSummary {
            total_days: self.days.len() as u32,
            avg_daily_calories: params.target_calories,
            dietary_notes,
        };

        self
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let body = trimmed.split("```").nth(1).unwrap_or_default();
    body.strip_prefix("json").unwrap_or(body).trim()
}
