// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod dashboard;
pub mod goals;
pub mod grouping;
pub mod view_model;

pub use dashboard::{NutritionDashboard, NutritionState};
pub use goals::{GoalCache, GoalResolver, GoalSource};
pub use grouping::{effective_meal_type, group_meals_by_type, normalize_meal};
pub use view_model::build_view_model;
