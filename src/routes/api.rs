// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for meals, goals and the nutrition dashboard.

use crate::error::{AppError, Result};
use crate::models::{
    FullNutritionData, NutritionData, NutritionTargets, StoredMeal, UserNutritionGoals,
    UserProfile,
};
use crate::services::NutritionState;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_USER_ID_LEN: usize = 128;
const MEAL_ID_BYTES: usize = 12;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{user_id}/meals", post(create_meal))
        .route("/api/users/{user_id}/meals/today", get(get_todays_meals))
        .route("/api/users/{user_id}/nutrition", get(get_nutrition))
        .route("/api/users/{user_id}/meals/{meal_id}", delete(delete_meal))
        .route("/api/users/{user_id}/goals", get(get_goals))
        .route("/api/users/{user_id}/targets", put(put_targets))
        .route("/api/users/{user_id}/profile", put(put_profile))
        .route("/api/goals/cache", delete(clear_goal_cache))
}

fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.is_empty() || user_id.chars().count() > MAX_USER_ID_LEN {
        return Err(AppError::BadRequest(format!(
            "User id must be 1-{} characters",
            MAX_USER_ID_LEN
        )));
    }
    if user_id.chars().any(char::is_control) {
        return Err(AppError::BadRequest(
            "User id must not contain control characters".to_string(),
        ));
    }
    Ok(())
}

// ─── Meals ───────────────────────────────────────────────────

/// Macro numbers supplied when logging a meal.
#[derive(Debug, Deserialize, Validate)]
pub struct NutritionInput {
    #[validate(range(min = 0.0))]
    pub calories: Option<f64>,
    #[validate(range(min = 0.0))]
    pub protein: Option<f64>,
    #[validate(range(min = 0.0))]
    pub carbs: Option<f64>,
    #[validate(range(min = 0.0))]
    pub fat: Option<f64>,
}

impl From<NutritionInput> for NutritionData {
    fn from(input: NutritionInput) -> Self {
        Self {
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fat: input.fat,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// ISO 8601; defaults to now
    pub timestamp: Option<String>,
    #[validate(nested)]
    pub nutrition_data: Option<NutritionInput>,
    /// Explicit meal type, overrides time-of-day grouping
    #[validate(length(max = 40))]
    pub meal_type: Option<String>,
    /// Free-form analysis details stored alongside the meal
    pub analysis: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Log a new meal for `user_id`.
async fn create_meal(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<StoredMeal>)> {
    validate_user_id(&user_id)?;
    request.validate()?;
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Meal name must not be blank".to_string()));
    }

    let timestamp = match request.timestamp {
        Some(raw) => {
            crate::time_utils::parse_local_timestamp(&raw, &state.config.display_tz)
                .map_err(|_| {
                    AppError::BadRequest(
                        "Invalid 'timestamp': must be an ISO 8601 datetime".to_string(),
                    )
                })?;
            raw
        }
        None => format_utc_rfc3339(chrono::Utc::now()),
    };

    let full_nutrition_data = if request.meal_type.is_some() || request.analysis.is_some() {
        Some(FullNutritionData {
            meal_type: request.meal_type,
            extra: request.analysis.unwrap_or_default(),
        })
    } else {
        None
    };

    let meal = StoredMeal {
        id: generate_meal_id()?,
        name: request.name.trim().to_string(),
        timestamp,
        nutrition_data: request.nutrition_data.map(NutritionData::from),
        full_nutrition_data,
    };

    state.meal_store.save_meal(&user_id, meal.clone()).await?;
    tracing::info!(user_id = %user_id, meal_id = %meal.id, name = %meal.name, "Meal logged");

    Ok((StatusCode::CREATED, Json(meal)))
}

/// The user's meals for today as stored, in recording order.
async fn get_todays_meals(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<StoredMeal>>> {
    validate_user_id(&user_id)?;

    let meals = state.meal_store.todays_meals(&user_id).await?;
    Ok(Json(meals.iter().map(|m| (**m).clone()).collect()))
}

fn generate_meal_id() -> Result<String> {
    let mut bytes = [0u8; MEAL_ID_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate meal id")))?;
    Ok(hex::encode(bytes))
}

// ─── Dashboard ───────────────────────────────────────────────

/// Reload and return the user's nutrition dashboard.
async fn get_nutrition(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<NutritionState>> {
    validate_user_id(&user_id)?;
    tracing::debug!(user_id = %user_id, "Loading nutrition dashboard");

    let dashboard = state.dashboard(&user_id);
    Ok(Json(dashboard.load_nutrition_data().await))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteMealResponse {
    pub success: bool,
}

/// Delete a meal and refresh the user's dashboard.
async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Path((user_id, meal_id)): Path<(String, String)>,
) -> Result<Json<DeleteMealResponse>> {
    validate_user_id(&user_id)?;

    let success = state.dashboard(&user_id).handle_delete_meal(&meal_id).await;
    Ok(Json(DeleteMealResponse { success }))
}

// ─── Goals ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalsResponse {
    pub goals: UserNutritionGoals,
    /// "cache", "targets", "profile" or "defaults"
    pub source: String,
}

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<GoalsResponse>> {
    validate_user_id(&user_id)?;

    let (goals, source) = state.goal_resolver.resolve_with_source(&user_id).await;
    Ok(Json(GoalsResponse {
        goals,
        source: source.as_str().to_string(),
    }))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TargetsRequest {
    #[validate(range(min = 0.0, max = 20000.0))]
    pub daily_calories: f64,
    #[validate(range(min = 0.0, max = 2000.0))]
    pub target_protein: f64,
    #[validate(range(min = 0.0, max = 2000.0))]
    pub target_carbs: f64,
    #[validate(range(min = 0.0, max = 2000.0))]
    pub target_fat: f64,
}

/// Save explicit targets; they take precedence over the profile.
async fn put_targets(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<TargetsRequest>,
) -> Result<Json<UserNutritionGoals>> {
    validate_user_id(&user_id)?;
    request.validate()?;

    let targets = NutritionTargets {
        daily_calories: request.daily_calories,
        target_protein: request.target_protein,
        target_carbs: request.target_carbs,
        target_fat: request.target_fat,
    };
    let goals = UserNutritionGoals::from(&targets);

    state
        .profile_store
        .save_nutrition_targets(&user_id, targets)
        .await?;
    state.goal_resolver.clear_cache(Some(&user_id));
    tracing::info!(user_id = %user_id, calories = goals.calories, "Nutrition targets saved");

    Ok(Json(goals))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 130))]
    pub age: Option<u32>,
    #[validate(range(min = 0.0, max = 700.0))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.0, max = 300.0))]
    pub height_cm: Option<f64>,
    #[validate(length(max = 40))]
    pub activity_level: Option<String>,
    #[validate(length(max = 200))]
    pub goal: Option<String>,
    #[validate(range(min = 0.0, max = 20000.0))]
    pub daily_calories: Option<f64>,
    #[validate(range(min = 0.0, max = 2000.0))]
    pub target_protein: Option<f64>,
    #[validate(range(min = 0.0, max = 2000.0))]
    pub target_carbs: Option<f64>,
    #[validate(range(min = 0.0, max = 2000.0))]
    pub target_fat: Option<f64>,
}

/// Save the onboarding profile.
async fn put_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<UserProfile>> {
    validate_user_id(&user_id)?;
    request.validate()?;

    let profile = UserProfile {
        user_id: user_id.clone(),
        name: request.name,
        age: request.age,
        weight_kg: request.weight_kg,
        height_cm: request.height_cm,
        activity_level: request.activity_level,
        goal: request.goal,
        daily_calories: request.daily_calories,
        target_protein: request.target_protein,
        target_carbs: request.target_carbs,
        target_fat: request.target_fat,
    };

    state.profile_store.save_user_profile(profile.clone()).await?;
    state.goal_resolver.clear_cache(Some(&user_id));
    tracing::info!(user_id = %user_id, "User profile saved");

    Ok(Json(profile))
}

/// Drop every cached goal entry.
async fn clear_goal_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    state.goal_resolver.clear_cache(None);
    StatusCode::NO_CONTENT
}
