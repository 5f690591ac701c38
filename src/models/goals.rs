// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily nutrition goals and the persisted records they are resolved from.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Goals used whenever nothing is persisted for a user.
pub const DEFAULT_NUTRITION_GOALS: UserNutritionGoals = UserNutritionGoals {
    calories: 2000.0,
    protein: 150.0,
    carbs: 200.0,
    fat: 65.0,
};

/// Daily calorie and macro targets for one user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserNutritionGoals {
    /// kcal per day
    pub calories: f64,
    /// grams per day
    pub protein: f64,
    /// grams per day
    pub carbs: f64,
    /// grams per day
    pub fat: f64,
}

impl Default for UserNutritionGoals {
    fn default() -> Self {
        DEFAULT_NUTRITION_GOALS
    }
}

impl From<&NutritionTargets> for UserNutritionGoals {
    fn from(targets: &NutritionTargets) -> Self {
        Self {
            calories: targets.daily_calories,
            protein: targets.target_protein,
            carbs: targets.target_carbs,
            fat: targets.target_fat,
        }
    }
}

/// Explicit nutrition targets, stored separately from the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    pub daily_calories: f64,
    pub target_protein: f64,
    pub target_carbs: f64,
    pub target_fat: f64,
}

/// Profile captured during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// e.g. "sedentary", "moderate", "very active"
    #[serde(default)]
    pub activity_level: Option<String>,
    /// e.g. "lose weight", "maintain", "build muscle"
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub daily_calories: Option<f64>,
    #[serde(default)]
    pub target_protein: Option<f64>,
    #[serde(default)]
    pub target_carbs: Option<f64>,
    #[serde(default)]
    pub target_fat: Option<f64>,
}

impl UserProfile {
    /// Goals from the profile, if it carries a daily calorie value.
    ///
    /// Macros the profile leaves out take the matching default. A stored
    /// zero is kept as zero.
    pub fn nutrition_goals(&self) -> Option<UserNutritionGoals> {
        let calories = self.daily_calories?;
        Some(UserNutritionGoals {
            calories,
            protein: self.target_protein.unwrap_or(DEFAULT_NUTRITION_GOALS.protein),
            carbs: self.target_carbs.unwrap_or(DEFAULT_NUTRITION_GOALS.carbs),
            fat: self.target_fat.unwrap_or(DEFAULT_NUTRITION_GOALS.fat),
        })
    }
}
