// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal type labels and time-of-day bucketing.

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Hour (local) at which lunch starts.
const LUNCH_START_HOUR: u32 = 11;
/// Hour (local) at which dinner starts.
const DINNER_START_HOUR: u32 = 15;
/// Hour (local) from which everything counts as a snack.
const SNACK_START_HOUR: u32 = 19;

/// Glyph used for meal types without a dedicated emoji.
pub const DEFAULT_MEAL_EMOJI: &str = "🍽️";

/// Meal type used to group a day's meals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    /// Any other label from an explicit meal type ("Brunch", "Pre-workout").
    Other(String),
}

impl MealType {
    /// Bucket a local hour of day (0-23).
    ///
    /// Boundary hours belong to the later bucket: 11:00 is lunch, 15:00 is
    /// dinner, 19:00 is a snack.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            h if h < LUNCH_START_HOUR => MealType::Breakfast,
            h if h < DINNER_START_HOUR => MealType::Lunch,
            h if h < SNACK_START_HOUR => MealType::Dinner,
            _ => MealType::Snack,
        }
    }

    /// Classify a timestamp by its hour in the timestamp's own time zone.
    pub fn classify<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self::from_hour(at.hour())
    }

    /// Normalize a free-text meal type.
    ///
    /// Returns `None` for blank input. The four canonical types match
    /// case-insensitively; anything else becomes `Other`, lower-cased with
    /// its first letter upper-cased, so "BRUNCH" and "brunch" share a label.
    pub fn from_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let canonical = match trimmed.to_ascii_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        };

        Some(canonical.unwrap_or_else(|| {
            MealType::Other(capitalize_first(&trimmed.to_lowercase()))
        }))
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
            MealType::Other(label) => label.as_str(),
        }
    }

    /// Emoji shown next to the group header.
    pub fn emoji(&self) -> &'static str {
        match self {
            MealType::Breakfast => "🍳",
            MealType::Lunch => "🥗",
            MealType::Dinner => "🍲",
            MealType::Snack => "🍎",
            MealType::Other(_) => DEFAULT_MEAL_EMOJI,
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for MealType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
