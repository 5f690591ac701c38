// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stored meal records and daily nutrition totals.

use crate::error::{AppError, Result};
use crate::time_utils::parse_local_timestamp;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A meal as persisted by the meal store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StoredMeal {
    /// Unique meal identifier
    pub id: String,
    /// Free-text label
    pub name: String,
    /// When the meal was recorded (ISO 8601)
    pub timestamp: String,
    /// Macro numbers, possibly partial
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_data: Option<NutritionData>,
    /// Richer analysis record; its `mealType` overrides time bucketing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_nutrition_data: Option<FullNutritionData>,
}

impl StoredMeal {
    /// Parse `timestamp` into the display zone.
    pub fn recorded_at(&self, tz: &Tz) -> Result<DateTime<Tz>> {
        parse_local_timestamp(&self.timestamp, tz)
            .map_err(|e| AppError::invalid_timestamp(&self.id, e))
    }

    /// Explicit meal type label from the full nutrition record, if any.
    pub fn explicit_meal_type(&self) -> Option<&str> {
        self.full_nutrition_data
            .as_ref()
            .and_then(|full| full.meal_type.as_deref())
    }
}

/// Per-meal macro numbers. Each field may be individually absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct NutritionData {
    /// Energy (kcal)
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: Option<f64>,
    /// Protein (g)
    #[serde(default, deserialize_with = "lenient_number")]
    pub protein: Option<f64>,
    /// Carbohydrates (g)
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbs: Option<f64>,
    /// Fat (g)
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat: Option<f64>,
}

/// Full analysis record attached to a meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct FullNutritionData {
    /// Explicit meal type ("breakfast", "snack", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    /// Everything else the analysis produced, kept verbatim
    #[serde(flatten)]
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Read a JSON number, treating any other JSON value as absent.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64))
}

/// Summed macros for a set of meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    /// Sum nutrition data across meals; missing fields count as zero.
    pub fn from_meals(meals: &[Arc<StoredMeal>]) -> Self {
        meals
            .iter()
            .filter_map(|meal| meal.nutrition_data.as_ref())
            .fold(Self::default(), |acc, data| Self {
                calories: acc.calories + data.calories.unwrap_or(0.0),
                protein: acc.protein + data.protein.unwrap_or(0.0),
                carbs: acc.carbs + data.carbs.unwrap_or(0.0),
                fat: acc.fat + data.fat.unwrap_or(0.0),
            })
    }
}
