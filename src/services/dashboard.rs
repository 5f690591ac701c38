// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition dashboard state for one user.
//!
//! Runs the full pipeline (today's meals → totals + groups → goals → view
//! model) on demand and keeps the latest result. Each load takes a sequence
//! number under the state lock; a load that finishes after a newer one has
//! already been applied is dropped, so a slow goal lookup can never
//! overwrite fresher state.

use crate::db::MealStore;
use crate::error::Result;
use crate::models::NutritionViewModel;
use crate::services::goals::GoalResolver;
use crate::services::grouping::group_meals_by_type;
use crate::services::view_model::build_view_model;
use chrono_tz::Tz;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Snapshot handed to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NutritionState {
    /// A load is still outstanding
    pub is_loading: bool,
    /// Message from the last failed load or delete
    pub error: Option<String>,
    pub mobile_nutrition_data: NutritionViewModel,
}

impl Default for NutritionState {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            mobile_nutrition_data: NutritionViewModel::empty(),
        }
    }
}

struct DashboardState {
    snapshot: NutritionState,
    /// Sequence number of the newest load started
    issued: u64,
    /// Sequence number of the load that produced `snapshot`
    applied: u64,
}

impl DashboardState {
    fn refresh_loading(&mut self) {
        self.snapshot.is_loading = self.applied < self.issued;
    }
}

/// Loads and holds the nutrition view for one user.
pub struct NutritionDashboard {
    user_id: String,
    meals: Arc<dyn MealStore>,
    goals: GoalResolver,
    tz: Tz,
    state: RwLock<DashboardState>,
}

impl NutritionDashboard {
    pub fn new(
        user_id: impl Into<String>,
        meals: Arc<dyn MealStore>,
        goals: GoalResolver,
        tz: Tz,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            meals,
            goals,
            tz,
            state: RwLock::new(DashboardState {
                snapshot: NutritionState::default(),
                issued: 0,
                applied: 0,
            }),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Current snapshot without reloading.
    pub async fn state(&self) -> NutritionState {
        self.state.read().await.snapshot.clone()
    }

    /// Rebuild the view model from scratch.
    ///
    /// Failures never leave stale data behind: the snapshot gets the error
    /// message and the empty view model.
    pub async fn load_nutrition_data(&self) -> NutritionState {
        let seq = {
            let mut state = self.state.write().await;
            state.issued += 1;
            state.refresh_loading();
            state.issued
        };

        let result = self.run_pipeline().await;

        let mut state = self.state.write().await;
        if seq < state.applied {
            tracing::debug!(
                user_id = %self.user_id,
                seq,
                applied = state.applied,
                "Dropping stale nutrition load"
            );
            state.refresh_loading();
            return state.snapshot.clone();
        }

        state.applied = seq;
        match result {
            Ok(view) => {
                state.snapshot.error = None;
                state.snapshot.mobile_nutrition_data = view;
            }
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "Nutrition load failed");
                state.snapshot.error = Some(e.to_string());
                state.snapshot.mobile_nutrition_data = NutritionViewModel::empty();
            }
        }
        state.refresh_loading();

        state.snapshot.clone()
    }

    /// Delete a meal and reload if the store reports it was removed.
    ///
    /// Returns the store's success flag unchanged; a store error counts as
    /// `false` and is recorded in the snapshot.
    pub async fn handle_delete_meal(&self, meal_id: &str) -> bool {
        match self.meals.delete_meal(&self.user_id, meal_id).await {
            Ok(true) => {
                tracing::info!(user_id = %self.user_id, meal_id, "Meal deleted");
                self.load_nutrition_data().await;
                true
            }
            Ok(false) => {
                tracing::debug!(user_id = %self.user_id, meal_id, "Meal not found for delete");
                false
            }
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, meal_id, error = %e, "Meal delete failed");
                self.state.write().await.snapshot.error = Some(e.to_string());
                false
            }
        }
    }

    async fn run_pipeline(&self) -> Result<NutritionViewModel> {
        // Totals and groups come from the same snapshot of meals.
        let meals = self.meals.todays_meals(&self.user_id).await?;
        let totals = self.meals.todays_nutrition_summary(&meals);
        let groups = group_meals_by_type(&meals, &self.tz)?;

        let goals = self.goals.resolve(&self.user_id).await;

        Ok(build_view_model(&totals, groups, Some(&goals)))
    }
}
