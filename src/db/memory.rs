// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory stores.
//!
//! Each user's meals keep insertion order (the order the UI recorded them
//! in); profiles and targets are keyed by user id.

use crate::db::{MealStore, ProfileStore};
use crate::error::Result;
use crate::models::{NutritionTargets, StoredMeal, UserProfile};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use dashmap::DashMap;
use std::sync::Arc;

/// Per-user meal logs held in process memory.
#[derive(Clone)]
pub struct InMemoryMealStore {
    meals: Arc<DashMap<String, Vec<Arc<StoredMeal>>>>,
    /// Zone that defines the local calendar day
    tz: Tz,
}

impl InMemoryMealStore {
    pub fn new(tz: Tz) -> Self {
        Self {
            meals: Arc::new(DashMap::new()),
            tz,
        }
    }

    /// The user's meals recorded on the given local date, in recording order.
    ///
    /// Meals whose timestamp does not parse never match a date and are skipped.
    pub fn meals_on(&self, user_id: &str, date: NaiveDate) -> Vec<Arc<StoredMeal>> {
        let Some(meals) = self.meals.get(user_id) else {
            return Vec::new();
        };

        meals
            .iter()
            .filter(|meal| match meal.recorded_at(&self.tz) {
                Ok(at) => at.date_naive() == date,
                Err(e) => {
                    tracing::warn!(
                        user_id,
                        meal_id = %meal.id,
                        error = %e,
                        "Skipping meal with unreadable timestamp"
                    );
                    false
                }
            })
            .cloned()
            .collect()
    }

    /// Number of stored meals across all users and days.
    pub fn len(&self) -> usize {
        self.meals.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MealStore for InMemoryMealStore {
    async fn todays_meals(&self, user_id: &str) -> Result<Vec<Arc<StoredMeal>>> {
        let today = Utc::now().with_timezone(&self.tz).date_naive();
        Ok(self.meals_on(user_id, today))
    }

    async fn delete_meal(&self, user_id: &str, id: &str) -> Result<bool> {
        let deleted = match self.meals.get_mut(user_id) {
            Some(mut meals) => {
                let before = meals.len();
                meals.retain(|meal| meal.id != id);
                meals.len() < before
            }
            None => false,
        };
        self.meals.remove_if(user_id, |_, meals| meals.is_empty());

        tracing::debug!(user_id, meal_id = id, deleted, "Delete meal");
        Ok(deleted)
    }

    async fn save_meal(&self, user_id: &str, meal: StoredMeal) -> Result<()> {
        let meal = Arc::new(meal);
        let mut meals = self.meals.entry(user_id.to_string()).or_default();

        match meals.iter_mut().find(|existing| existing.id == meal.id) {
            Some(existing) => *existing = meal,
            None => meals.push(meal),
        }
        Ok(())
    }
}

/// Profiles and nutrition targets held in process memory.
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    targets: Arc<DashMap<String, NutritionTargets>>,
    profiles: Arc<DashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn nutrition_targets(&self, user_id: &str) -> Result<Option<NutritionTargets>> {
        Ok(self.targets.get(user_id).map(|t| t.clone()))
    }

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.get(user_id).map(|p| p.clone()))
    }

    async fn save_nutrition_targets(
        &self,
        user_id: &str,
        targets: NutritionTargets,
    ) -> Result<()> {
        self.targets.insert(user_id.to_string(), targets);
        Ok(())
    }

    async fn save_user_profile(&self, profile: UserProfile) -> Result<()> {
        self.profiles.insert(profile.user_id.clone(), profile);
        Ok(())
    }
}
