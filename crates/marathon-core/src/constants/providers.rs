// ABOUTME: Upstream provider endpoints, names and request limits
// ABOUTME: Strava activity API and Oura v2 usercollection API defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Strava constants
pub mod strava {
    /// Provider name used in logs, errors and cache keys
    pub const NAME: &str = "strava";
    /// REST API base URL
    pub const API_BASE: &str = "https://www.strava.com/api/v3";
    /// OAuth token endpoint
    pub const TOKEN_URL: &str = "https://www.strava.com/oauth/token";
    /// Page size for the activity list (Strava maximum)
    pub const ACTIVITIES_PER_PAGE: u32 = 200;
    /// `type`/`sport_type` values counted as running
    pub const RUN_TYPES: &[&str] = &["Run", "TrailRun"];
}

/// Oura constants
pub mod oura {
    /// Provider name used in logs, errors and cache keys
    pub const NAME: &str = "oura";
    /// REST API base URL
    pub const API_BASE: &str = "https://api.ouraring.com";
    /// OAuth token endpoint
    pub const TOKEN_URL: &str = "https://cloud.ouraring.com/oauth/token";
    /// Daily sleep collection path
    pub const DAILY_SLEEP_PATH: &str = "/v2/usercollection/daily_sleep";
    /// Daily readiness collection path
    pub const DAILY_READINESS_PATH: &str = "/v2/usercollection/daily_readiness";
    /// Heart rate time series path
    pub const HEART_RATE_PATH: &str = "/v2/usercollection/heartrate";
}

/// Fallback access token lifetime when a token response omits `expires_in`
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 21_600; // 6 hours
