// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use nutrition_tracker::config::Config;
use nutrition_tracker::db::{InMemoryMealStore, InMemoryProfileStore, MealStore, ProfileStore};
use nutrition_tracker::error::{AppError, Result};
use nutrition_tracker::models::{
    FullNutritionData, NutritionData, NutritionTargets, StoredMeal, UserProfile,
};
use nutrition_tracker::routes::create_router;
use nutrition_tracker::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};

/// UTC, used as the display zone in tests.
#[allow(dead_code)]
pub fn utc() -> Tz {
    Tz::UTC
}

/// RFC3339 timestamp for today (UTC) at the given clock time.
#[allow(dead_code)]
pub fn today_at(hour: u32, minute: u32) -> String {
    format!(
        "{}T{:02}:{:02}:00Z",
        Utc::now().date_naive().format("%Y-%m-%d"),
        hour,
        minute
    )
}

#[allow(dead_code)]
pub fn nutrition(calories: f64, protein: f64, carbs: f64, fat: f64) -> Option<NutritionData> {
    Some(NutritionData {
        calories: Some(calories),
        protein: Some(protein),
        carbs: Some(carbs),
        fat: Some(fat),
    })
}

/// Build a stored meal.
#[allow(dead_code)]
pub fn meal(id: &str, timestamp: &str, nutrition_data: Option<NutritionData>) -> StoredMeal {
    StoredMeal {
        id: id.to_string(),
        name: format!("Meal {}", id),
        timestamp: timestamp.to_string(),
        nutrition_data,
        full_nutrition_data: None,
    }
}

/// Build a stored meal with an explicit meal type.
#[allow(dead_code)]
pub fn typed_meal(id: &str, timestamp: &str, meal_type: &str) -> StoredMeal {
    StoredMeal {
        full_nutrition_data: Some(FullNutritionData {
            meal_type: Some(meal_type.to_string()),
            ..Default::default()
        }),
        ..meal(id, timestamp, None)
    }
}

#[allow(dead_code)]
pub fn targets(calories: f64, protein: f64, carbs: f64, fat: f64) -> NutritionTargets {
    NutritionTargets {
        daily_calories: calories,
        target_protein: protein,
        target_carbs: carbs,
        target_fat: fat,
    }
}

/// Profile store that counts lookups.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct CountingProfileStore {
    pub inner: InMemoryProfileStore,
    pub target_lookups: Arc<AtomicUsize>,
    pub profile_lookups: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingProfileStore {
    pub fn target_lookups(&self) -> usize {
        self.target_lookups.load(Ordering::SeqCst)
    }

    pub fn profile_lookups(&self) -> usize {
        self.profile_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for CountingProfileStore {
    async fn nutrition_targets(&self, user_id: &str) -> Result<Option<NutritionTargets>> {
        self.target_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.nutrition_targets(user_id).await
    }

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.profile_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.user_profile(user_id).await
    }

    async fn save_nutrition_targets(
        &self,
        user_id: &str,
        targets: NutritionTargets,
    ) -> Result<()> {
        self.inner.save_nutrition_targets(user_id, targets).await
    }

    async fn save_user_profile(&self, profile: UserProfile) -> Result<()> {
        self.inner.save_user_profile(profile).await
    }
}

/// Profile store whose reads always fail.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct FailingProfileStore {
    pub lookups: Arc<AtomicUsize>,
}

#[async_trait]
impl ProfileStore for FailingProfileStore {
    async fn nutrition_targets(&self, _user_id: &str) -> Result<Option<NutritionTargets>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Storage("targets unavailable".to_string()))
    }

    async fn user_profile(&self, _user_id: &str) -> Result<Option<UserProfile>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Storage("profiles unavailable".to_string()))
    }

    async fn save_nutrition_targets(
        &self,
        _user_id: &str,
        _targets: NutritionTargets,
    ) -> Result<()> {
        Err(AppError::Storage("read-only".to_string()))
    }

    async fn save_user_profile(&self, _profile: UserProfile) -> Result<()> {
        Err(AppError::Storage("read-only".to_string()))
    }
}

/// Meal store whose every operation fails.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct FailingMealStore;

#[async_trait]
impl MealStore for FailingMealStore {
    async fn todays_meals(&self, _user_id: &str) -> Result<Vec<Arc<StoredMeal>>> {
        Err(AppError::Storage("meal log unavailable".to_string()))
    }

    async fn delete_meal(&self, _user_id: &str, _id: &str) -> Result<bool> {
        Err(AppError::Storage("meal log unavailable".to_string()))
    }

    async fn save_meal(&self, _user_id: &str, _meal: StoredMeal) -> Result<()> {
        Err(AppError::Storage("meal log unavailable".to_string()))
    }
}

/// Meal store serving a fixed list of meals, e.g. with corrupt timestamps.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct FixedMealStore {
    pub meals: Vec<Arc<StoredMeal>>,
}

#[async_trait]
impl MealStore for FixedMealStore {
    async fn todays_meals(&self, _user_id: &str) -> Result<Vec<Arc<StoredMeal>>> {
        Ok(self.meals.clone())
    }

    async fn delete_meal(&self, _user_id: &str, _id: &str) -> Result<bool> {
        Ok(false)
    }

    async fn save_meal(&self, _user_id: &str, _meal: StoredMeal) -> Result<()> {
        Ok(())
    }
}

/// Profile store whose first targets lookup blocks until released.
///
/// `entered` fires once that first lookup is waiting.
#[allow(dead_code)]
pub struct GatedProfileStore {
    pub inner: InMemoryProfileStore,
    gate: Mutex<Option<(oneshot::Sender<()>, oneshot::Receiver<()>)>>,
}

#[allow(dead_code)]
impl GatedProfileStore {
    /// Returns the store, a receiver signalled when the first lookup is
    /// parked, and a sender that releases it.
    pub fn new(inner: InMemoryProfileStore) -> (Self, oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let store = Self {
            inner,
            gate: Mutex::new(Some((entered_tx, release_rx))),
        };
        (store, entered_rx, release_tx)
    }
}

#[async_trait]
impl ProfileStore for GatedProfileStore {
    async fn nutrition_targets(&self, user_id: &str) -> Result<Option<NutritionTargets>> {
        let gate = self.gate.lock().await.take();
        if let Some((entered, release)) = gate {
            let _ = entered.send(());
            let _ = release.await;
        }
        self.inner.nutrition_targets(user_id).await
    }

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.inner.user_profile(user_id).await
    }

    async fn save_nutrition_targets(
        &self,
        user_id: &str,
        targets: NutritionTargets,
    ) -> Result<()> {
        self.inner.save_nutrition_targets(user_id, targets).await
    }

    async fn save_user_profile(&self, profile: UserProfile) -> Result<()> {
        self.inner.save_user_profile(profile).await
    }
}

/// Create a test app backed by in-memory stores.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let meal_store = Arc::new(InMemoryMealStore::new(config.display_tz));
    let profile_store = Arc::new(InMemoryProfileStore::new());

    let state = Arc::new(AppState::new(config, meal_store, profile_store));
    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
