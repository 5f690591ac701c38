// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod goals;
pub mod meal;
pub mod meal_type;
pub mod view;

pub use goals::{NutritionTargets, UserNutritionGoals, UserProfile, DEFAULT_NUTRITION_GOALS};
pub use meal::{FullNutritionData, NutritionData, NutritionTotals, StoredMeal};
pub use meal_type::MealType;
pub use view::{MacroBreakdown, MacroProgress, MealGroup, NormalizedMealItem, NutritionViewModel};
