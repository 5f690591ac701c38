// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Nutrition tracker: meal logging and a goal-relative daily nutrition view.
//!
//! This crate groups a day's meals by meal type, resolves each user's daily
//! calorie and macro goals, and serves the combined dashboard view model.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use dashmap::DashMap;
use db::{MealStore, ProfileStore};
use services::{GoalCache, GoalResolver, NutritionDashboard};
use std::sync::Arc;

/// Dashboards kept before idle ones are dropped.
pub const MAX_DASHBOARDS: usize = 1024;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub meal_store: Arc<dyn MealStore>,
    pub profile_store: Arc<dyn ProfileStore>,
    pub goal_resolver: GoalResolver,
    dashboards: DashMap<String, Arc<NutritionDashboard>>,
    max_dashboards: usize,
}

impl AppState {
    pub fn new(
        config: Config,
        meal_store: Arc<dyn MealStore>,
        profile_store: Arc<dyn ProfileStore>,
    ) -> Self {
        let goal_resolver = GoalResolver::new(
            profile_store.clone(),
            GoalCache::new(config.goal_cache_ttl),
        );
        Self {
            config,
            meal_store,
            profile_store,
            goal_resolver,
            dashboards: DashMap::new(),
            max_dashboards: MAX_DASHBOARDS,
        }
    }

    /// Same state with a different dashboard limit.
    pub fn with_dashboard_limit(mut self, max_dashboards: usize) -> Self {
        self.max_dashboards = max_dashboards;
        self
    }

    /// The dashboard for `user_id`, created on first use.
    ///
    /// Once the limit is reached, creating a new dashboard first drops every
    /// dashboard no caller still holds. Their snapshots are rebuilt by the
    /// next load anyway.
    pub fn dashboard(&self, user_id: &str) -> Arc<NutritionDashboard> {
        if let Some(dashboard) = self.dashboards.get(user_id) {
            return dashboard.clone();
        }

        if self.dashboards.len() >= self.max_dashboards {
            let before = self.dashboards.len();
            self.dashboards.retain(|_, dashboard| Arc::strong_count(dashboard) > 1);
            tracing::debug!(
                evicted = before.saturating_sub(self.dashboards.len()),
                "Dropped idle dashboards"
            );
        }

        self.dashboards
            .entry(user_id.to_string())
            .or_insert_with(|| {
                Arc::new(NutritionDashboard::new(
                    user_id,
                    self.meal_store.clone(),
                    self.goal_resolver.clone(),
                    self.config.display_tz,
                ))
            })
            .clone()
    }

    /// Number of dashboards currently held.
    pub fn dashboard_count(&self) -> usize {
        self.dashboards.len()
    }
}
