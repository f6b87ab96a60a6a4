#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use mealplanner_mealplan::{Generator, MemoryPlanStore, PlanStore};
use mealplanner_shared::{
    Error, Result,
    mealplan::{Day, Meal, MealType, PlanContent, PlanDocument, PlanParameters, PlanSummary},
};

pub fn created_at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn params(days: u32, target_calories: u32) -> PlanParameters {
    PlanParameters {
        days,
        servings: 2,
        target_calories,
        preferences: String::new(),
    }
}

pub fn meal(meal_type: MealType, name: impl Into<String>, calories: u32) -> Meal {
    Meal {
        meal_type,
        name: name.into(),
        ingredients: vec!["oats".to_owned(), "berries".to_owned()],
        calories,
        protein: "25g".to_owned(),
        carbs: "45g".to_owned(),
        fat: "12g".to_owned(),
        instructions: Some("Cook gently.".to_owned()),
    }
}

/// A day the way the generator writes it: 25/35/35 of the target.
pub fn day(day_number: u32, target_calories: u32) -> Day {
    let quarter = target_calories / 4;
    let share = target_calories * 35 / 100;

    Day {
        day_number,
        label: format!("Day {day_number}"),
        total_calories: target_calories,
        meals: vec![
            meal(MealType::Breakfast, format!("Oatmeal {day_number}"), quarter),
            meal(MealType::Lunch, format!("Lentil salad {day_number}"), share),
            meal(MealType::Dinner, format!("Baked salmon {day_number}"), share),
        ],
    }
}

pub fn content(days: u32, target_calories: u32) -> PlanContent {
    PlanContent {
        title: "Balanced Week".to_owned(),
        days: (1..=days).map(|n| day(n, target_calories)).collect(),
        summary: PlanSummary {
            total_days: days,
            avg_daily_calories: target_calories,
            dietary_notes: Some("Rich in fiber".to_owned()),
        },
    }
}

pub fn plan(id: &str, user_id: &str, days: u32, target_calories: u32) -> PlanDocument {
    let content = content(days, target_calories);

    PlanDocument {
        id: id.to_owned(),
        user_id: user_id.to_owned(),
        title: content.title,
        parameters: params(days, target_calories),
        summary: content.summary,
        days: content.days,
        created_at: created_at(0),
    }
}

pub async fn seeded_store(plans: Vec<PlanDocument>) -> anyhow::Result<MemoryPlanStore> {
    let store = MemoryPlanStore::new();
    for plan in plans {
        store.insert_plan(plan).await?;
    }

    Ok(store)
}

/// Wraps the memory store with switchable failures and a persist log.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryPlanStore,
    pub fail_persist: AtomicBool,
    pub hang_persist: AtomicBool,
    pub fail_delete: AtomicBool,
    pub persisted: Mutex<Vec<(String, PlanParameters)>>,
}

impl FlakyStore {
    pub async fn with_plans(plans: Vec<PlanDocument>) -> anyhow::Result<Self> {
        Ok(Self {
            inner: seeded_store(plans).await?,
            ..Default::default()
        })
    }

    pub fn persisted(&self) -> Vec<(String, PlanParameters)> {
        self.persisted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanStore for FlakyStore {
    async fn fetch_plan(&self, id: &str) -> Result<Option<PlanDocument>> {
        self.inner.fetch_plan(id).await
    }

    async fn persist_parameters(&self, id: &str, params: &PlanParameters) -> Result<()> {
        if self.hang_persist.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(Error::Store("connection reset".to_owned()));
        }

        self.inner.persist_parameters(id, params).await?;
        self.persisted
            .lock()
            .unwrap()
            .push((id.to_owned(), params.to_owned()));

        Ok(())
    }

    async fn delete_plan(&self, id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Error::Store("connection reset".to_owned()));
        }

        self.inner.delete_plan(id).await
    }

    async fn list_plans(&self, user_id: &str) -> Result<Vec<PlanDocument>> {
        self.inner.list_plans(user_id).await
    }

    async fn insert_plan(&self, plan: PlanDocument) -> Result<()> {
        self.inner.insert_plan(plan).await
    }
}

/// Answers every request with a well formed plan unless told otherwise.
#[derive(Default)]
pub struct FakeGenerator {
    pub fenced: bool,
    pub failing: bool,
    pub untitled: bool,
    pub misnumbered: bool,
    pub day_shortfall: u32,
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, params: &PlanParameters) -> anyhow::Result<String> {
        if self.failing {
            anyhow::bail!("model unavailable");
        }

        let days = params.days.saturating_sub(self.day_shortfall);
        let mut content = content(days, params.target_calories);
        if self.untitled {
            content.title.clear();
        }
        if self.misnumbered {
            for day in &mut content.days {
                day.day_number = 1;
                day.total_calories = 0;
            }
            content.summary.total_days = 0;
        }

        let body = serde_json::to_string_pretty(&content)?;

        Ok(match self.fenced {
            true => format!("```json\n{body}\n```"),
            false => body,
        })
    }
}
