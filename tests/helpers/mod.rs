#![allow(dead_code)]

use std::path::PathBuf;

use temp_dir::TempDir;

/// A three day, 1800 calorie plan owned by john.
pub const PLAN: &str = r#"{
    "id": "01JJ0000000000000000000000",
    "user_id": "john",
    "title": "Balanced Week",
    "parameters": {"days": 3, "servings": 2, "target_calories": 1800, "preferences": ""},
    "summary": {"total_days": 3, "avg_daily_calories": 1800, "dietary_notes": "Rich in fiber"},
    "days": [
        {"day": 1, "date": "Monday", "total_calories": 1800, "meals": [
            {"type": "Breakfast", "name": "Oatmeal", "ingredients": ["oats"], "calories": 450, "protein": "15g", "carbs": "60g", "fat": "8g"},
            {"type": "Lunch", "name": "Lentil salad", "ingredients": ["lentils"], "calories": 630, "protein": "30g", "carbs": "70g", "fat": "12g"},
            {"type": "Dinner", "name": "Baked salmon", "ingredients": ["salmon"], "calories": 630, "protein": "40g", "carbs": "20g", "fat": "25g"}
        ]},
        {"day": 2, "date": "Tuesday", "total_calories": 1800, "meals": [
            {"type": "Breakfast", "name": "Yogurt", "ingredients": ["yogurt"], "calories": 450, "protein": "20g", "carbs": "40g", "fat": "10g"},
            {"type": "Lunch", "name": "Bean wrap", "ingredients": ["beans"], "calories": 630, "protein": "25g", "carbs": "75g", "fat": "14g"},
            {"type": "Dinner", "name": "Tofu stir fry", "ingredients": ["tofu"], "calories": 630, "protein": "32g", "carbs": "50g", "fat": "20g"}
        ]},
        {"day": 3, "date": "Wednesday", "total_calories": 1800, "meals": [
            {"type": "Breakfast", "name": "Eggs", "ingredients": ["eggs"], "calories": 450, "protein": "24g", "carbs": "10g", "fat": "30g"},
            {"type": "Lunch", "name": "Quinoa bowl", "ingredients": ["quinoa"], "calories": 630, "protein": "22g", "carbs": "80g", "fat": "15g"},
            {"type": "Dinner", "name": "Chicken curry", "ingredients": ["chicken"], "calories": 630, "protein": "45g", "carbs": "40g", "fat": "22g"}
        ]}
    ],
    "created_at": "2025-01-20T09:00:00Z"
}"#;

/// Writes `contents` to `name` inside `dir`.
pub fn write(dir: &TempDir, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.child(name);
    std::fs::write(&path, contents)?;

    Ok(path)
}

/// [`PLAN`] with another id and calorie target.
pub fn plan_json(id: &str, target_calories: u32) -> String {
    PLAN.replace("01JJ0000000000000000000000", id)
        .replace(
            "\"target_calories\": 1800",
            &format!("\"target_calories\": {target_calories}"),
        )
        .replace(
            "\"avg_daily_calories\": 1800",
            &format!("\"avg_daily_calories\": {target_calories}"),
        )
        .replace(
            "\"total_calories\": 1800",
            &format!("\"total_calories\": {target_calories}"),
        )
}
