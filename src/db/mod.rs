// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer.
//!
//! The pipeline only talks to storage through these traits; `memory`
//! provides the in-process implementations used by the server and tests.

pub mod memory;

pub use memory::{InMemoryMealStore, InMemoryProfileStore};

use crate::error::Result;
use crate::models::{NutritionTargets, NutritionTotals, StoredMeal, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage of each user's meal log.
///
/// Meals are owned by one user; no method ever sees another user's meals.
#[async_trait]
pub trait MealStore: Send + Sync {
    /// The user's meals whose local calendar date is today, in recording order.
    async fn todays_meals(&self, user_id: &str) -> Result<Vec<Arc<StoredMeal>>>;

    /// Sum nutrition across `meals`, treating missing fields as zero.
    fn todays_nutrition_summary(&self, meals: &[Arc<StoredMeal>]) -> NutritionTotals {
        NutritionTotals::from_meals(meals)
    }

    /// Delete one of the user's meals. Returns `false` if the user has no
    /// meal with that id.
    async fn delete_meal(&self, user_id: &str, id: &str) -> Result<bool>;

    /// Insert a meal for the user, replacing any of their meals with the same id.
    async fn save_meal(&self, user_id: &str, meal: StoredMeal) -> Result<()>;
}

/// Storage of onboarding profiles and explicit nutrition targets.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn nutrition_targets(&self, user_id: &str) -> Result<Option<NutritionTargets>>;

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    async fn save_nutrition_targets(&self, user_id: &str, targets: NutritionTargets)
        -> Result<()>;

    async fn save_user_profile(&self, profile: UserProfile) -> Result<()>;
}
