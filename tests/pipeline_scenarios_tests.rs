// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end checks of the grouping and view model pipeline.
//!
//! If these fail, the dashboard shows meals under the wrong heading or
//! reports the wrong calories left for the day.

use nutrition_tracker::models::{
    MealType, NutritionTotals, StoredMeal, UserNutritionGoals, DEFAULT_NUTRITION_GOALS,
};
use nutrition_tracker::services::{build_view_model, group_meals_by_type};
use std::sync::Arc;

mod common;
use common::{meal, nutrition, typed_meal, utc};

fn shared(meals: Vec<StoredMeal>) -> Vec<Arc<StoredMeal>> {
    meals.into_iter().map(Arc::new).collect()
}

#[test]
fn test_breakfast_and_lunch_scenario() {
    let meals = shared(vec![
        meal("1", "2024-03-04T08:00:00Z", nutrition(200.0, 15.0, 5.0, 12.0)),
        meal("2", "2024-03-04T08:15:00Z", nutrition(150.0, 5.0, 25.0, 3.0)),
        meal("3", "2024-03-04T12:30:00Z", nutrition(300.0, 40.0, 0.0, 15.0)),
    ]);

    let groups = group_meals_by_type(&meals, &utc()).unwrap();
    assert_eq!(groups.len(), 2);

    assert_eq!(groups[0].meal_type, MealType::Breakfast);
    assert_eq!(groups[0].count, 2);
    let breakfast_ids: Vec<&str> = groups[0].items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(breakfast_ids, vec!["1", "2"]);

    assert_eq!(groups[1].meal_type, MealType::Lunch);
    assert_eq!(groups[1].count, 1);
    assert_eq!(groups[1].items[0].id, "3");
    assert_eq!(groups[1].items[0].time, "12:30 PM");
    assert_eq!(groups[1].items[0].carbs, 0.0);
}

#[test]
fn test_explicit_snack_beats_morning_time() {
    let meals = shared(vec![typed_meal("1", "2024-03-04T08:00:00Z", "snack")]);

    let groups = group_meals_by_type(&meals, &utc()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].meal_type.label(), "Snack");
}

#[test]
fn test_over_goal_leaves_zero_remaining() {
    let totals = NutritionTotals {
        calories: 2500.0,
        protein: 100.0,
        carbs: 200.0,
        fat: 60.0,
    };
    let goals = UserNutritionGoals {
        calories: 2000.0,
        ..DEFAULT_NUTRITION_GOALS
    };

    let view = build_view_model(&totals, vec![], Some(&goals));
    assert_eq!(view.calories_remaining, 0.0);
    assert_eq!(view.calories_consumed, 2500.0);
}

#[test]
fn test_first_seen_order_lunch_breakfast_lunch() {
    let meals = shared(vec![
        meal("a", "2024-03-04T12:00:00Z", None),
        meal("b", "2024-03-04T07:00:00Z", None),
        meal("c", "2024-03-04T14:59:00Z", None),
    ]);

    let groups = group_meals_by_type(&meals, &utc()).unwrap();
    let order: Vec<&MealType> = groups.iter().map(|g| &g.meal_type).collect();
    assert_eq!(order, vec![&MealType::Lunch, &MealType::Breakfast]);
}

#[test]
fn test_no_meal_dropped_or_duplicated() {
    let hours = [23, 6, 11, 15, 19, 10, 14, 18, 0, 12, 16, 21];
    for len in 0..=hours.len() {
        let meals = shared(
            hours[..len]
                .iter()
                .enumerate()
                .map(|(i, hour)| {
                    meal(
                        &i.to_string(),
                        &format!("2024-03-04T{:02}:00:00Z", hour),
                        None,
                    )
                })
                .collect(),
        );

        let groups = group_meals_by_type(&meals, &utc()).unwrap();
        let total: usize = groups.iter().map(|g| g.items.len()).sum();
        assert_eq!(total, len);

        let mut ids: Vec<String> = groups
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.id.clone()))
            .collect();
        ids.sort_by_key(|id| id.parse::<usize>().unwrap());
        let expected: Vec<String> = (0..len).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);

        for group in &groups {
            assert_eq!(group.count, group.items.len());
        }
    }
}

#[test]
fn test_group_ids_follow_creation_order() {
    let meals = shared(vec![
        meal("1", "2024-03-04T20:00:00Z", None),
        meal("2", "2024-03-04T16:00:00Z", None),
        meal("3", "2024-03-04T09:00:00Z", None),
        meal("4", "2024-03-04T21:00:00Z", None),
    ]);

    let groups = group_meals_by_type(&meals, &utc()).unwrap();
    let ids: Vec<u32> = groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(groups[0].meal_type, MealType::Snack);
    assert_eq!(groups[0].count, 2);
}

#[test]
fn test_full_pipeline_is_deterministic() {
    let meals = shared(vec![
        meal("1", "2024-03-04T08:00:00Z", nutrition(200.0, 15.0, 5.0, 12.0)),
        typed_meal("2", "2024-03-04T10:00:00Z", "brunch"),
        meal("3", "2024-03-04T19:30:00Z", nutrition(120.0, 2.0, 20.0, 4.0)),
    ]);

    let build = || {
        let totals = NutritionTotals::from_meals(&meals);
        let groups = group_meals_by_type(&meals, &utc()).unwrap();
        build_view_model(&totals, groups, None)
    };

    let first = build();
    let second = build();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    assert_eq!(first.calories_consumed, 320.0);
    assert_eq!(first.meals.len(), 3);
}

#[test]
fn test_view_model_json_shape() {
    let meals = shared(vec![meal(
        "1",
        "2024-03-04T08:00:00Z",
        nutrition(200.0, 15.0, 5.0, 12.0),
    )]);
    let groups = group_meals_by_type(&meals, &utc()).unwrap();
    let view = build_view_model(&NutritionTotals::from_meals(&meals), groups, None);

    let json = serde_json::to_value(&view).unwrap();
    let group = &json["meals"][0];
    assert_eq!(group["type"], "Breakfast");
    assert_eq!(group["emoji"], "🍳");
    assert_eq!(group["count"], 1);
    assert_eq!(group["items"][0]["time"], "08:00 AM");
    assert_eq!(group["items"][0]["fullMeal"]["id"], "1");
    assert_eq!(
        group["items"][0]["fullMeal"]["nutritionData"]["calories"],
        200.0
    );
    assert_eq!(json["caloriesRemaining"], 1800.0);
}
