use mealplanner_shared::{
    Error, Result,
    mealplan::{Day, Meal, MealType, PlanDocument, PlanParameters, PlanSummary},
};
use validator::Validate;

pub const PLACEHOLDER_INGREDIENT: &str = "Placeholder: not AI-generated";
pub const PLACEHOLDER_MACRO: &str = "n/a";
pub const PLACEHOLDER_INSTRUCTIONS: &str = "Placeholder meal added locally when the plan was extended; regenerate the plan for AI-authored content.";

/// Share of the daily target, in percent, given to each synthesized meal.
const SYNTHESIZED_SPLIT: [(MealType, u32); 3] = [
    (MealType::Breakfast, 25),
    (MealType::Lunch, 35),
    (MealType::Dinner, 35),
];

/// Reshapes `original` so it satisfies `params`.
///
/// Days beyond the new count are dropped, missing days are synthesized with
/// placeholder meals, and every retained meal is rescaled against the
/// original target so repeated edits never compound rounding. The title and
/// summary are regenerated from `params`; id, owner and creation time are
/// kept.
pub fn recompute(original: &PlanDocument, params: &PlanParameters) -> Result<PlanDocument> {
    params.validate()?;

    let source_target = original.parameters.target_calories;
    if source_target == 0 {
        return Err(Error::DegenerateSource {
            plan_id: original.id.to_owned(),
        });
    }

    let target = params.target_calories;

    tracing::debug!(
        plan_id = %original.id,
        from_days = original.days.len(),
        to_days = params.days,
        from_calories = source_target,
        to_calories = target,
        "recomputing plan"
    );

    let mut days: Vec<Day> = original
        .days
        .iter()
        .take(params.days as usize)
        .map(|day| rescale_day(day, source_target, target))
        .collect();

    let first_synthesized = original.days.len() as u32 + 1;
    days.extend(
        (first_synthesized..=params.days).map(|day_number| synthesize_day(day_number, target)),
    );

    let summary = PlanSummary {
        total_days: params.days,
        avg_daily_calories: target,
        dietary_notes: params
            .preferences()
            .map(str::to_owned)
            .or_else(|| original.summary.dietary_notes.to_owned()),
    };

    Ok(PlanDocument {
        id: original.id.to_owned(),
        user_id: original.user_id.to_owned(),
        title: plan_title(params),
        parameters: params.to_owned(),
        summary,
        days,
        created_at: original.created_at,
    })
}

/// Title derived from the day count and preferences, e.g. `7-Day Vegan Meal Plan`.
pub fn plan_title(params: &PlanParameters) -> String {
    match params.preferences() {
        Some(preferences) => format!("{}-Day {preferences} Meal Plan", params.days),
        None => format!("{}-Day Meal Plan", params.days),
    }
}

fn rescale_day(day: &Day, source_target: u32, target: u32) -> Day {
    Day {
        day_number: day.day_number,
        label: day.label.to_owned(),
        total_calories: target,
        meals: day
            .meals
            .iter()
            .map(|meal| Meal {
                calories: scale(meal.calories, target, source_target),
                ..meal.to_owned()
            })
            .collect(),
    }
}

fn synthesize_day(day_number: u32, target: u32) -> Day {
    Day {
        day_number,
        label: format!("Day {day_number}"),
        total_calories: target,
        meals: SYNTHESIZED_SPLIT
            .iter()
            .map(|(meal_type, percent)| Meal {
                meal_type: meal_type.to_owned(),
                name: format!("{meal_type} (placeholder)"),
                ingredients: vec![PLACEHOLDER_INGREDIENT.to_owned()],
                calories: scale(target, *percent, 100),
                protein: PLACEHOLDER_MACRO.to_owned(),
                carbs: PLACEHOLDER_MACRO.to_owned(),
                fat: PLACEHOLDER_MACRO.to_owned(),
                instructions: Some(PLACEHOLDER_INSTRUCTIONS.to_owned()),
            })
            .collect(),
    }
}

/// `round(value * numerator / denominator)`, halves rounding up.
///
/// Saturates at `u32::MAX` rather than failing; a meal that large is already
/// outside any plan the generator produces.
fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    let value = u128::from(value);
    let numerator = u128::from(numerator);
    let denominator = u128::from(denominator);
    let scaled = (2 * value * numerator + denominator) / (2 * denominator);

    u32::try_from(scaled).unwrap_or(u32::MAX)
}
