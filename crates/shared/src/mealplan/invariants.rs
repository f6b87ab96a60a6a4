use super::PlanDocument;

/// A broken consistency rule of a [`PlanDocument`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("day {day_number} totals {actual} calories, plan targets {expected}")]
    DayTotal {
        day_number: u32,
        expected: u32,
        actual: u32,
    },

    #[error("day at position {position} is numbered {actual}, expected {expected}")]
    DayNumbering {
        position: usize,
        expected: u32,
        actual: u32,
    },

    #[error("plan asks for {expected} days but contains {actual}")]
    DayCount { expected: u32, actual: usize },

    #[error("summary lists {actual} days, plan contains {expected}")]
    SummaryDays { expected: usize, actual: u32 },

    #[error("summary averages {actual} calories, plan targets {expected}")]
    SummaryCalories { expected: u32, actual: u32 },
}

impl PlanDocument {
    /// Every consistency rule this document breaks, in document order.
    pub fn violations(&self) -> Vec<Violation> {
        let target = self.parameters.target_calories;
        let mut violations = Vec::new();

        if self.days.len() != self.parameters.days as usize {
            violations.push(Violation::DayCount {
                expected: self.parameters.days,
                actual: self.days.len(),
            });
        }

        for (position, day) in self.days.iter().enumerate() {
            let expected = position as u32 + 1;
            if day.day_number != expected {
                violations.push(Violation::DayNumbering {
                    position,
                    expected,
                    actual: day.day_number,
                });
            }

            if day.total_calories != target {
                violations.push(Violation::DayTotal {
                    day_number: day.day_number,
                    expected: target,
                    actual: day.total_calories,
                });
            }
        }

        if self.summary.total_days as usize != self.days.len() {
            violations.push(Violation::SummaryDays {
                expected: self.days.len(),
                actual: self.summary.total_days,
            });
        }

        if self.summary.avg_daily_calories != target {
            violations.push(Violation::SummaryCalories {
                expected: target,
                actual: self.summary.avg_daily_calories,
            });
        }

        violations
    }

    pub fn is_consistent(&self) -> bool {
        self.violations().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::mealplan::{Day, PlanParameters, PlanSummary};

    fn document(day_numbers: &[u32], total: u32) -> PlanDocument {
        PlanDocument {
            id: "p1".to_owned(),
            user_id: "john".to_owned(),
            title: "Plan".to_owned(),
            parameters: PlanParameters {
                days: day_numbers.len() as u32,
                servings: 2,
                target_calories: 2000,
                preferences: String::new(),
            },
            summary: PlanSummary {
                total_days: day_numbers.len() as u32,
                avg_daily_calories: 2000,
                dietary_notes: None,
            },
            days: day_numbers
                .iter()
                .map(|n| Day {
                    day_number: *n,
                    label: format!("Day {n}"),
                    total_calories: total,
                    meals: vec![],
                })
                .collect(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn consistent_document_has_no_violations() {
        assert!(document(&[1, 2, 3], 2000).is_consistent());
    }

    #[test]
    fn reports_gap_and_day_totals() {
        let violations = document(&[1, 3], 1900).violations();
        assert_eq!(
            violations,
            vec![
                Violation::DayTotal {
                    day_number: 1,
                    expected: 2000,
                    actual: 1900,
                },
                Violation::DayNumbering {
                    position: 1,
                    expected: 2,
                    actual: 3,
                },
                Violation::DayTotal {
                    day_number: 3,
                    expected: 2000,
                    actual: 1900,
                },
            ]
        );
    }

    #[test]
    fn reports_summary_drift() {
        let mut plan = document(&[1, 2], 2000);
        plan.summary.total_days = 3;
        plan.summary.avg_daily_calories = 1800;
        plan.parameters.days = 4;

        let violations = plan.violations();
        assert_eq!(violations.len(), 3);
        assert_eq!(
            violations[0].to_string(),
            "plan asks for 4 days but contains 2"
        );
    }
}
