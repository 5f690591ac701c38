// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP router: health check, nutrition API and the shared layers.

pub mod api;

use crate::error::AppError;
use crate::AppState;
use axum::extract::State;
use axum::http::{header, request::Parts, HeaderValue, Method, Uri};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Origins always accepted for local development.
const DEV_ORIGIN_PREFIXES: [&str; 2] = ["http://localhost", "http://127.0.0.1"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    /// Entries currently held in the goal cache
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub cached_goal_entries: usize,
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id: option_env!("BUILD_ID").unwrap_or("unknown").to_string(),
        cached_goal_entries: state.goal_resolver.cache().len(),
    })
}

/// JSON 404 for unknown paths, same body shape as other API errors.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

fn is_allowed_origin(origin: &str, frontend_url: &str) -> bool {
    origin == frontend_url
        || DEV_ORIGIN_PREFIXES
            .iter()
            .any(|prefix| origin.starts_with(prefix))
}

fn cors_layer(frontend_url: String) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| is_allowed_origin(origin, &frontend_url))
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.frontend_url.clone());

    Router::new()
        .route("/health", get(health_check))
        .merge(api::routes())
        .fallback(not_found)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins() {
        let frontend = "https://meals.example.com";
        assert!(is_allowed_origin(frontend, frontend));
        assert!(is_allowed_origin("http://localhost:5173", frontend));
        assert!(is_allowed_origin("http://127.0.0.1:3000", frontend));
        assert!(!is_allowed_origin("https://evil.example.com", frontend));
        assert!(!is_allowed_origin("https://meals.example.com.evil", frontend));
    }
}
