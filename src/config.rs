// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::services::goals::GOAL_CACHE_TTL;
use crate::time_utils::parse_time_zone;
use chrono_tz::Tz;
use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Zone used for "today" and for meal-time bucketing and formatting
    pub display_tz: Tz,
    /// How long resolved nutrition goals stay cached per user
    pub goal_cache_ttl: Duration,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            display_tz: Tz::UTC,
            goal_cache_ttl: GOAL_CACHE_TTL,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        // DISPLAY_TZ wins; a plain IANA TZ is honoured; otherwise UTC.
        let display_tz = match env::var("DISPLAY_TZ") {
            Ok(raw) => parse_time_zone(&raw).ok_or(ConfigError::Invalid {
                name: "DISPLAY_TZ",
                value: raw,
            })?,
            Err(_) => env::var("TZ")
                .ok()
                .and_then(|raw| parse_time_zone(&raw))
                .unwrap_or(Tz::UTC),
        };

        let goal_cache_ttl = match env::var("GOAL_CACHE_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    name: "GOAL_CACHE_TTL_SECS",
                    value: raw,
                })?,
            Err(_) => GOAL_CACHE_TTL,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            display_tz,
            goal_cache_ttl,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
