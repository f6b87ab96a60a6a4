mod content;
mod invariants;

pub use content::*;
pub use invariants::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Top-level knobs of a plan, the only part a user edits after generation.
#[derive(Validate, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlanParameters {
    #[validate(range(min = 1))]
    pub days: u32,
    #[validate(range(min = 1))]
    pub servings: u32,
    #[validate(range(min = 1))]
    pub target_calories: u32,
    #[serde(default)]
    pub preferences: String,
}

impl PlanParameters {
    /// Preferences as free text, `None` when blank.
    pub fn preferences(&self) -> Option<&str> {
        let preferences = self.preferences.trim();
        (!preferences.is_empty()).then_some(preferences)
    }
}

#[derive(EnumString, Display, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(from = "String", into = "String")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[strum(to_string = "Snack", serialize = "snacks")]
    Snack,
    #[strum(default)]
    Other(String),
}

impl From<String> for MealType {
    fn from(value: String) -> Self {
        MealType::from(value.trim())
    }
}

impl From<MealType> for String {
    fn from(value: MealType) -> Self {
        value.to_string()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub calories: u32,
    #[serde(default)]
    pub protein: String,
    #[serde(default)]
    pub carbs: String,
    #[serde(default)]
    pub fat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Day {
    #[serde(rename = "day")]
    pub day_number: u32,
    #[serde(rename = "date", default)]
    pub label: String,
    #[serde(default)]
    pub total_calories: u32,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl Day {
    pub fn meal_calories(&self) -> u64 {
        self.meals.iter().map(|meal| u64::from(meal.calories)).sum()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub total_days: u32,
    pub avg_daily_calories: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
}

/// A generated meal plan as stored and shown to its owner.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlanDocument {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub parameters: PlanParameters,
    pub summary: PlanSummary,
    pub days: Vec<Day>,
    pub created_at: DateTime<Utc>,
}
