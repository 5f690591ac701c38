// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Final dashboard view model assembly.

use crate::models::{
    MacroBreakdown, MacroProgress, MealGroup, NutritionTotals, NutritionViewModel,
    UserNutritionGoals, DEFAULT_NUTRITION_GOALS,
};

/// Combine daily totals, grouped meals and goals.
///
/// Only `calories_remaining` is clamped; macro `current` values are raw so
/// the UI can tell when a goal was exceeded.
pub fn build_view_model(
    totals: &NutritionTotals,
    meals: Vec<MealGroup>,
    goals: Option<&UserNutritionGoals>,
) -> NutritionViewModel {
    let goals = goals.copied().unwrap_or(DEFAULT_NUTRITION_GOALS);

    NutritionViewModel {
        calories_consumed: totals.calories,
        calories_goal: goals.calories,
        calories_remaining: (goals.calories - totals.calories).max(0.0),
        macros: MacroBreakdown {
            protein: MacroProgress::grams(totals.protein, goals.protein),
            carbs: MacroProgress::grams(totals.carbs, goals.carbs),
            fat: MacroProgress::grams(totals.fat, goals.fat),
        },
        meals,
    }
}

impl NutritionViewModel {
    /// View shown when loading fails: nothing consumed, default goals.
    pub fn empty() -> Self {
        build_view_model(&NutritionTotals::default(), Vec::new(), None)
    }
}

impl Default for NutritionViewModel {
    fn default() -> Self {
        Self::empty()
    }
}
