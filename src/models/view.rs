// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display-ready shapes consumed by the dashboard UI.
//!
//! These are rebuilt from scratch on every refresh and never patched in place.

use crate::models::meal::StoredMeal;
use crate::models::meal_type::MealType;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Unit reported for every macro.
pub const MACRO_UNIT: &str = "g";

/// One meal, normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NormalizedMealItem {
    pub id: String,
    pub name: String,
    /// Local clock time, e.g. "08:15 AM"
    pub time: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    /// The untouched source record, shared with the store snapshot
    pub full_meal: Arc<StoredMeal>,
}

/// Meals sharing a meal type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealGroup {
    /// Position-based id, only meaningful within a single build
    pub id: u32,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub meal_type: MealType,
    pub emoji: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub count: usize,
    pub items: Vec<NormalizedMealItem>,
}

impl MealGroup {
    /// Start a group holding its first item.
    pub fn new(id: u32, meal_type: MealType, first: NormalizedMealItem) -> Self {
        Self {
            id,
            emoji: meal_type.emoji().to_string(),
            meal_type,
            count: 1,
            items: vec![first],
        }
    }

    /// Append an item, keeping `count` equal to `items.len()`.
    pub fn push(&mut self, item: NormalizedMealItem) {
        self.items.push(item);
        self.count = self.items.len();
    }
}

/// Progress of one macro against its goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct MacroProgress {
    /// Raw total, may exceed `goal`
    pub current: f64,
    pub goal: f64,
    pub unit: String,
}

impl MacroProgress {
    pub fn grams(current: f64, goal: f64) -> Self {
        Self {
            current,
            goal,
            unit: MACRO_UNIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct MacroBreakdown {
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
}

/// Everything the nutrition dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NutritionViewModel {
    pub calories_consumed: f64,
    pub calories_goal: f64,
    /// Never negative
    pub calories_remaining: f64,
    pub macros: MacroBreakdown,
    pub meals: Vec<MealGroup>,
}
