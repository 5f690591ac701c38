// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition Tracker API Server
//!
//! Logs meals and serves a per-user daily nutrition dashboard with meals
//! grouped by type and progress against resolved calorie and macro goals.

use nutrition_tracker::{
    config::Config,
    db::{InMemoryMealStore, InMemoryProfileStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        display_tz = %config.display_tz,
        goal_cache_ttl_secs = config.goal_cache_ttl.as_secs(),
        "Starting Nutrition Tracker API"
    );

    let meal_store = Arc::new(InMemoryMealStore::new(config.display_tz));
    let profile_store = Arc::new(InMemoryProfileStore::new());
    tracing::info!("In-memory stores initialized");

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), meal_store, profile_store));

    // Build router
    let app = nutrition_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nutrition_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
