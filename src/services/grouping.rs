// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal normalization and grouping by meal type.
//!
//! Groups come out in the order each meal type is first seen in the input,
//! not sorted by time or name. Items keep input order within a group.

use crate::error::Result;
use crate::models::{MealGroup, MealType, NormalizedMealItem, StoredMeal};
use crate::time_utils::format_clock_time;
use chrono_tz::Tz;
use std::sync::Arc;

/// Convert one stored meal into a display item.
///
/// Every macro defaults to zero when absent; the source record is shared,
/// not copied. A malformed timestamp is returned as an error.
pub fn normalize_meal(meal: &Arc<StoredMeal>, tz: &Tz) -> Result<NormalizedMealItem> {
    let recorded_at = meal.recorded_at(tz)?;
    let nutrition = meal.nutrition_data.clone().unwrap_or_default();

    Ok(NormalizedMealItem {
        id: meal.id.clone(),
        name: meal.name.clone(),
        time: format_clock_time(&recorded_at),
        calories: nutrition.calories.unwrap_or(0.0),
        protein: nutrition.protein.unwrap_or(0.0),
        carbs: nutrition.carbs.unwrap_or(0.0),
        fat: nutrition.fat.unwrap_or(0.0),
        full_meal: Arc::clone(meal),
    })
}

/// Meal type a stored meal is grouped under.
///
/// An explicit meal type on the full nutrition record wins; otherwise the
/// local time of day decides.
pub fn effective_meal_type(meal: &StoredMeal, tz: &Tz) -> Result<MealType> {
    if let Some(explicit) = meal.explicit_meal_type().and_then(MealType::from_label) {
        return Ok(explicit);
    }
    Ok(MealType::classify(&meal.recorded_at(tz)?))
}

/// Bucket meals into groups by effective meal type.
pub fn group_meals_by_type(
    meals: &[Arc<StoredMeal>],
    tz: &Tz,
) -> Result<Vec<MealGroup>> {
    let mut groups: Vec<MealGroup> = Vec::new();

    for meal in meals {
        let meal_type = effective_meal_type(meal, tz)?;
        let item = normalize_meal(meal, tz)?;

        match groups.iter_mut().find(|g| g.meal_type == meal_type) {
            Some(group) => group.push(item),
            None => {
                let id = groups.len() as u32 + 1;
                groups.push(MealGroup::new(id, meal_type, item));
            }
        }
    }

    tracing::debug!(
        meals = meals.len(),
        groups = groups.len(),
        "Grouped meals by type"
    );
    Ok(groups)
}
