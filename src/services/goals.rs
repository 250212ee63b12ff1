// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal progress accumulation.

use crate::models::{Activity, Goal, GoalCategory};

/// Amount an activity contributes to a goal of `category`, if any.
///
/// Distance goals are tracked in kilometers. Duration goals have no
/// contributing metric and are never advanced.
pub fn contribution(category: GoalCategory, activity: &Activity) -> Option<f64> {
    match category {
        GoalCategory::Steps => Some(activity.steps as f64),
        GoalCategory::Calories => Some(activity.calories),
        GoalCategory::Distance => Some(activity.distance_km()),
        GoalCategory::Duration => None,
    }
}

/// Return a copy of `goals` with `activity` added to each matching goal.
///
/// Order is preserved and non-matching goals are passed through unchanged.
pub fn update_goals(goals: &[Goal], activity: &Activity) -> Vec<Goal> {
    goals
        .iter()
        .map(|goal| match contribution(goal.category, activity) {
            Some(amount) => Goal {
                current_value: goal.current_value + amount,
                ..goal.clone()
            },
            None => goal.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;

    fn make_goal(id: &str, category: GoalCategory, current: f64) -> Goal {
        Goal {
            id: id.to_string(),
            title: format!("Goal {}", id),
            target_value: 1000.0,
            current_value: current,
            unit: category.unit().to_string(),
            category,
            deadline: "Custom".to_string(),
        }
    }

    fn make_activity(steps: u64, calories: f64, distance: f64) -> Activity {
        Activity {
            id: "act".to_string(),
            activity_type: ActivityType::Walking,
            start_time: 0,
            end_time: 60_000,
            steps,
            distance,
            calories,
            path: vec![],
        }
    }

    #[test]
    fn test_steps_goal_accumulates() {
        let goals = vec![make_goal("s", GoalCategory::Steps, 100.0)];
        let updated = update_goals(&goals, &make_activity(500, 0.0, 0.0));
        assert_eq!(updated[0].current_value, 600.0);
    }

    #[test]
    fn test_each_category_gets_its_metric() {
        let goals = vec![
            make_goal("s", GoalCategory::Steps, 0.0),
            make_goal("c", GoalCategory::Calories, 10.0),
            make_goal("d", GoalCategory::Distance, 1.0),
            make_goal("t", GoalCategory::Duration, 5.0),
        ];
        let updated = update_goals(&goals, &make_activity(1200, 87.5, 2500.0));

        assert_eq!(updated[0].current_value, 1200.0);
        assert_eq!(updated[1].current_value, 97.5);
        assert_eq!(updated[2].current_value, 3.5);
        assert_eq!(updated[3], goals[3]);
    }

    #[test]
    fn test_order_and_identity_preserved() {
        let goals = vec![
            make_goal("b", GoalCategory::Calories, 0.0),
            make_goal("a", GoalCategory::Steps, 0.0),
        ];
        let updated = update_goals(&goals, &make_activity(10, 1.0, 0.0));
        let ids: Vec<&str> = updated.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(updated[0].title, goals[0].title);
        assert_eq!(updated[0].target_value, goals[0].target_value);
    }

    #[test]
    fn test_application_order_does_not_matter() {
        let goals = vec![
            make_goal("s", GoalCategory::Steps, 0.0),
            make_goal("d", GoalCategory::Distance, 0.0),
        ];
        let first = make_activity(300, 10.0, 1000.0);
        let second = make_activity(700, 20.0, 500.0);

        let ab = update_goals(&update_goals(&goals, &first), &second);
        let ba = update_goals(&update_goals(&goals, &second), &first);

        assert_eq!(ab[0].current_value, ba[0].current_value);
        assert_eq!(ab[1].current_value, ba[1].current_value);
        assert_eq!(ab[0].current_value, 1000.0);
        assert_eq!(ab[1].current_value, 1.5);
    }

    #[test]
    fn test_empty_goal_list() {
        assert!(update_goals(&[], &make_activity(1, 1.0, 1.0)).is_empty());
    }
}
