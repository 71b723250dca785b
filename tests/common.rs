// ABOUTME: Shared fixtures and helpers for dashboard integration tests
// ABOUTME: Provider record builders, token bundles and a loopback mock upstream
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]
//! Shared test utilities for `marathon_dashboard`

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::NaiveDate;
use marathon_dashboard::cache::memory::InMemoryCache;
use marathon_dashboard::cache::{CacheConfig, CacheProvider};
use marathon_dashboard::constants::providers::oura::{
    DAILY_READINESS_PATH, DAILY_SLEEP_PATH, HEART_RATE_PATH,
};
use marathon_dashboard::models::{OuraReadiness, OuraSleep, StravaActivity};
use marathon_dashboard::oauth2_client::{CredentialManager, OAuth2Client, OAuth2Config, TokenBundle};
use marathon_dashboard::providers::{OuraProvider, StravaProvider};
use marathon_dashboard::services::DashboardService;
use serde_json::json;
use tokio::net::TcpListener;

static INIT_LOGGER: Once = Once::new();

/// Quiet logger for tests; `TEST_LOG=debug` turns it up
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let level = std::env::var("TEST_LOG").unwrap_or_else(|_| "warn".to_owned());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(level)
            .with_test_writer()
            .try_init();
    });
}

pub fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("fixture date")
}

/// A run on `date` with the given distance (m), moving time (s) and climb (m)
pub fn run(id: u64, date: &str, meters: f64, seconds: u64, elevation: f64) -> StravaActivity {
    activity(id, date, "Run", meters, seconds, elevation)
}

pub fn activity(
    id: u64,
    date: &str,
    activity_type: &str,
    meters: f64,
    seconds: u64,
    elevation: f64,
) -> StravaActivity {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("{activity_type} {id}"),
        "type": activity_type,
        "sport_type": activity_type,
        "start_date_local": format!("{date}T07:30:00Z"),
        "distance": meters,
        "moving_time": seconds,
        "elapsed_time": seconds,
        "total_elevation_gain": elevation,
    }))
    .expect("activity fixture")
}

/// A sleep record with a score and total sleep in seconds
pub fn sleep(day: &str, score: f64, total_seconds: f64) -> OuraSleep {
    serde_json::from_value(json!({
        "id": format!("sleep-{day}"),
        "day": day,
        "score": score,
        "total_sleep_duration": total_seconds,
    }))
    .expect("sleep fixture")
}

pub fn readiness(day: &str, score: f64) -> OuraReadiness {
    serde_json::from_value(json!({
        "id": format!("readiness-{day}"),
        "day": day,
        "score": score,
    }))
    .expect("readiness fixture")
}

/// Bundle valid for another hour
pub fn fresh_bundle(access: &str, refresh: &str) -> TokenBundle {
    TokenBundle::expiring_in(access, refresh, 3_600)
}

/// Bundle that expired a minute ago
pub fn expired_bundle(access: &str, refresh: &str) -> TokenBundle {
    TokenBundle::expiring_in(access, refresh, -60)
}

pub async fn test_cache() -> Result<InMemoryCache> {
    let cache = InMemoryCache::new(CacheConfig {
        enable_background_cleanup: false,
        ..CacheConfig::default()
    })
    .await?;
    Ok(cache)
}

/// Serve `router` on an ephemeral loopback port, returning its base URL
pub async fn spawn_upstream(router: Router) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{addr}"))
}

/// Switches and counters of the loopback Strava/Oura stand-in
#[derive(Clone, Default)]
pub struct MockUpstream {
    pub activity_requests: Arc<AtomicUsize>,
    pub sleep_requests: Arc<AtomicUsize>,
    pub readiness_requests: Arc<AtomicUsize>,
    pub heart_rate_requests: Arc<AtomicUsize>,
    pub stats_requests: Arc<AtomicUsize>,
    pub token_requests: Arc<AtomicUsize>,
    pub sleep_fails: bool,
    pub readiness_throttled: bool,
}

impl MockUpstream {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn router(self) -> Router {
        Router::new()
            .route("/api/v3/athlete/activities", get(mock_activities))
            .route("/api/v3/athletes/:athlete_id/stats", get(mock_stats))
            .route(DAILY_SLEEP_PATH, get(mock_sleep))
            .route(DAILY_READINESS_PATH, get(mock_readiness))
            .route(HEART_RATE_PATH, get(mock_heart_rate))
            .route("/oauth/token", post(mock_token))
            .with_state(self)
    }

    /// Serve the mock and build a dashboard service pointed at it
    pub async fn service(&self) -> Result<DashboardService<InMemoryCache>> {
        let base = spawn_upstream(self.clone().router()).await?;
        let cache = Arc::new(test_cache().await?);
        let oauth = |provider: &str| {
            CredentialManager::new(OAuth2Client::new(OAuth2Config {
                provider: provider.to_owned(),
                client_id: "client-id".to_owned(),
                client_secret: "client-secret".to_owned(),
                token_url: format!("{base}/oauth/token"),
            }))
        };
        let strava = StravaProvider::new(format!("{base}/api/v3"), Arc::clone(&cache), oauth("strava"));
        let oura = OuraProvider::new(base.clone(), Arc::clone(&cache), oauth("oura"));
        Ok(DashboardService::new(cache, strava, oura))
    }
}

fn bearer_is_valid(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            ["Bearer strava-access", "Bearer oura-access", "Bearer refreshed-access"].contains(&value)
        })
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Authorization Error" }))).into_response()
}

/// Page 1 is a full page of rides, page 2 holds two runs inside 2025-03-01..=2025-03-07
async fn mock_activities(
    State(upstream): State<MockUpstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.activity_requests.fetch_add(1, Ordering::SeqCst);
    if !bearer_is_valid(&headers) {
        return unauthorized();
    }
    let page = params.get("page").map_or("1", String::as_str);
    let activities: Vec<StravaActivity> = match page {
        "1" => (0..200)
            .map(|i| activity(1_000 + i, "2025-03-03", "Ride", 20_000.0, 3_000, 50.0))
            .collect(),
        "2" => vec![
            run(1, "2025-03-02", 16_093.4, 3_600, 100.0),
            run(2, "2025-03-06", 8_046.7, 1_800, 20.0),
        ],
        _ => Vec::new(),
    };
    Json(activities).into_response()
}

async fn mock_stats(
    State(upstream): State<MockUpstream>,
    headers: HeaderMap,
    Path(athlete_id): Path<u64>,
) -> Response {
    upstream.stats_requests.fetch_add(1, Ordering::SeqCst);
    if !bearer_is_valid(&headers) {
        return unauthorized();
    }
    let totals = |count: u64| {
        json!({
            "count": count,
            "distance": count as f64 * 10_000.0,
            "moving_time": count * 3_000,
            "elapsed_time": count * 3_200,
            "elevation_gain": count as f64 * 40.0,
        })
    };
    Json(json!({
        "recent_run_totals": totals(athlete_id % 10),
        "ytd_run_totals": totals(40),
        "all_run_totals": totals(400),
    }))
    .into_response()
}

/// Two sleep records split across a `next_token` page boundary
async fn mock_sleep(
    State(upstream): State<MockUpstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.sleep_requests.fetch_add(1, Ordering::SeqCst);
    if upstream.sleep_fails {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    if !bearer_is_valid(&headers) {
        return unauthorized();
    }
    let body = match params.get("next_token").map(String::as_str) {
        None => json!({
            "data": [sleep("2025-03-04", 80.0, 28_800.0)],
            "next_token": "page-2",
        }),
        Some(_) => json!({
            "data": [sleep("2025-03-05", 90.0, 25_200.0)],
            "next_token": null,
        }),
    };
    Json(body).into_response()
}

async fn mock_readiness(State(upstream): State<MockUpstream>, headers: HeaderMap) -> Response {
    upstream.readiness_requests.fetch_add(1, Ordering::SeqCst);
    if upstream.readiness_throttled {
        return (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "120")], "slow down")
            .into_response();
    }
    if !bearer_is_valid(&headers) {
        return unauthorized();
    }
    Json(json!({
        "data": [
            readiness("2025-03-04", 70.0),
            readiness("2025-03-05", 75.0),
            readiness("2025-03-06", 80.0),
        ],
        "next_token": null,
    }))
    .into_response()
}

/// Heart rate samples; the datetime range parameters are required
async fn mock_heart_rate(
    State(upstream): State<MockUpstream>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    upstream.heart_rate_requests.fetch_add(1, Ordering::SeqCst);
    if !bearer_is_valid(&headers) {
        return unauthorized();
    }
    let (Some(start), Some(end)) = (params.get("start_datetime"), params.get("end_datetime")) else {
        return (StatusCode::BAD_REQUEST, "start_datetime and end_datetime required").into_response();
    };
    Json(json!({
        "data": [
            { "bpm": 52, "source": "rest", "timestamp": start },
            { "bpm": 148, "source": "workout", "timestamp": end },
        ],
        "next_token": null,
    }))
    .into_response()
}

/// Rotates any refresh token except `revoked`
async fn mock_token(
    State(upstream): State<MockUpstream>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    upstream.token_requests.fetch_add(1, Ordering::SeqCst);
    if form.get("refresh_token").map(String::as_str) == Some("revoked") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Refresh token revoked",
            })),
        )
            .into_response();
    }
    Json(json!({
        "access_token": "refreshed-access",
        "refresh_token": "refreshed-refresh",
        "expires_in": 21_600,
    }))
    .into_response()
}
