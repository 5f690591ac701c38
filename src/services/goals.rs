// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily nutrition goal resolution with per-user caching.
//!
//! Resolution order:
//! 1. Cached entry younger than the TTL (no I/O)
//! 2. Explicit nutrition targets
//! 3. Onboarding profile, if it has a daily calorie value
//! 4. Fixed defaults
//!
//! Store failures degrade to the defaults; goals are a display value and an
//! approximation beats an error page.

use crate::db::ProfileStore;
use crate::error::Result;
use crate::models::{UserNutritionGoals, DEFAULT_NUTRITION_GOALS};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default lifetime of a cached goal entry (5 minutes).
pub const GOAL_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default cap on live entries before the oldest is dropped.
pub const GOAL_CACHE_MAX_ENTRIES: usize = 10_000;

/// Cached goals with the instant they were stored.
#[derive(Clone)]
struct CachedGoals {
    goals: UserNutritionGoals,
    cached_at: Instant,
}

/// Per-user goal cache with a fixed time-to-live.
///
/// Clones share the same entries. Entries are only ever replaced whole.
/// Expired entries are removed when read and swept on every write, and the
/// oldest entry goes once `max_entries` live ones are held.
#[derive(Clone)]
pub struct GoalCache {
    entries: Arc<DashMap<String, CachedGoals>>,
    ttl: Duration,
    max_entries: usize,
}

impl Default for GoalCache {
    fn default() -> Self {
        Self::new(GOAL_CACHE_TTL)
    }
}

impl GoalCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
            max_entries: GOAL_CACHE_MAX_ENTRIES,
        }
    }

    /// Same cache with a different entry cap (at least one).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    fn is_fresh(&self, entry: &CachedGoals) -> bool {
        entry.cached_at.elapsed() < self.ttl
    }

    /// Goals for `user_id` if cached less than `ttl` ago.
    ///
    /// An expired entry is removed.
    pub fn get(&self, user_id: &str) -> Option<UserNutritionGoals> {
        {
            let entry = self.entries.get(user_id)?;
            if self.is_fresh(&entry) {
                return Some(entry.goals);
            }
        }
        self.entries.remove_if(user_id, |_, entry| !self.is_fresh(entry));
        None
    }

    /// Store goals for `user_id`, replacing any previous entry.
    pub fn set(&self, user_id: &str, goals: UserNutritionGoals) {
        self.entries.retain(|_, entry| self.is_fresh(entry));
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(user_id) {
            self.evict_oldest();
        }
        self.entries.insert(
            user_id.to_string(),
            CachedGoals {
                goals,
                cached_at: Instant::now(),
            },
        );
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.cached_at)
            .map(|entry| entry.key().clone());
        if let Some(user_id) = oldest {
            self.entries.remove(&user_id);
            tracing::debug!(user_id = %user_id, "Goal cache full, evicted oldest entry");
        }
    }

    /// Drop one user's entry.
    pub fn invalidate(&self, user_id: &str) {
        self.entries.remove(user_id);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of entries held. Expired entries count until the next read
    /// of that user or the next write.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a set of goals came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalSource {
    Cache,
    Targets,
    Profile,
    Defaults,
}

impl GoalSource {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalSource::Cache => "cache",
            GoalSource::Targets => "targets",
            GoalSource::Profile => "profile",
            GoalSource::Defaults => "defaults",
        }
    }
}

/// Resolves a user's daily goals from persisted data.
///
/// Concurrent misses for the same user may each query the store; the last
/// one to finish wins the cache slot.
#[derive(Clone)]
pub struct GoalResolver {
    store: Arc<dyn ProfileStore>,
    cache: GoalCache,
}

impl GoalResolver {
    pub fn new(store: Arc<dyn ProfileStore>, cache: GoalCache) -> Self {
        Self { store, cache }
    }

    /// The cache this resolver reads and fills.
    pub fn cache(&self) -> &GoalCache {
        &self.cache
    }

    /// Resolve goals for `user_id`. Never fails.
    pub async fn resolve(&self, user_id: &str) -> UserNutritionGoals {
        self.resolve_with_source(user_id).await.0
    }

    /// Resolve goals and report which source supplied them.
    pub async fn resolve_with_source(&self, user_id: &str) -> (UserNutritionGoals, GoalSource) {
        if let Some(goals) = self.cache.get(user_id) {
            return (goals, GoalSource::Cache);
        }

        match self.lookup(user_id).await {
            Ok((goals, source)) => {
                self.cache.set(user_id, goals);
                tracing::debug!(user_id, source = source.as_str(), "Resolved nutrition goals");
                (goals, source)
            }
            Err(e) => {
                // Not cached, so the next call retries the store.
                tracing::warn!(user_id, error = %e, "Goal lookup failed, using defaults");
                (DEFAULT_NUTRITION_GOALS, GoalSource::Defaults)
            }
        }
    }

    /// Clear one user's cached goals, or all of them with `None`.
    pub fn clear_cache(&self, user_id: Option<&str>) {
        match user_id {
            Some(id) => {
                self.cache.invalidate(id);
                tracing::debug!(user_id = id, "Goal cache entry cleared");
            }
            None => {
                self.cache.clear();
                tracing::debug!("Goal cache cleared");
            }
        }
    }

    async fn lookup(&self, user_id: &str) -> Result<(UserNutritionGoals, GoalSource)> {
        if let Some(targets) = self.store.nutrition_targets(user_id).await? {
            return Ok((UserNutritionGoals::from(&targets), GoalSource::Targets));
        }

        if let Some(goals) = self
            .store
            .user_profile(user_id)
            .await?
            .and_then(|profile| profile.nutrition_goals())
        {
            return Ok((goals, GoalSource::Profile));
        }

        Ok((DEFAULT_NUTRITION_GOALS, GoalSource::Defaults))
    }
}
