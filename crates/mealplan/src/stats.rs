use mealplanner_shared::mealplan::PlanDocument;
use serde::Serialize;

pub const DEFAULT_RECENT_PLANS: usize = 5;

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardStatistics {
    pub total_meal_plans: u64,
    pub total_days_planned: u64,
    pub average_target_calories: u64,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DashboardSummary {
    pub statistics: DashboardStatistics,
    pub recent_plans: Vec<PlanDocument>,
}

/// Counts, total days and rounded mean calorie target over `plans`.
///
/// The result does not depend on iteration order, so a slice, a vector or
/// the values of an id keyed map all give the same figures.
pub fn summarize<'a>(plans: impl IntoIterator<Item = &'a PlanDocument>) -> DashboardStatistics {
    let (count, days, calories) = plans
        .into_iter()
        .fold((0u64, 0u64, 0u64), |(count, days, calories), plan| {
            (
                count + 1,
                days + u64::from(plan.parameters.days),
                calories + u64::from(plan.parameters.target_calories),
            )
        });

    let average_target_calories = match count {
        0 => 0,
        count => (2 * calories + count) / (2 * count),
    };

    DashboardStatistics {
        total_meal_plans: count,
        total_days_planned: days,
        average_target_calories,
    }
}

/// The `limit` newest plans, newest first.
pub fn recent_plans<'a>(
    plans: impl IntoIterator<Item = &'a PlanDocument>,
    limit: usize,
) -> Vec<PlanDocument> {
    let mut plans: Vec<&PlanDocument> = plans.into_iter().collect();
    plans.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    plans.into_iter().take(limit).cloned().collect()
}

pub fn dashboard(plans: &[PlanDocument], limit: usize) -> DashboardSummary {
    DashboardSummary {
        statistics: summarize(plans),
        recent_plans: recent_plans(plans, limit),
    }
}
