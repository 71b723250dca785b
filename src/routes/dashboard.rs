// ABOUTME: Dashboard route handlers serving the training report and raw provider data
// ABOUTME: Parses query parameters, calls the dashboard service and keeps rotated tokens
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Dashboard routes
//!
//! - `GET /data?date=YYYY-MM-DD&lookback=N`: report for the window ending on `date`
//! - `GET /activities|sleep|readiness|heartrate?startDate&endDate`: raw records of one source
//! - `GET /stats/:athlete_id`: Strava run totals
//! - `POST /cache/flush`: drop every memoized provider response

use super::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::{Report, ReportWindow};
use crate::oauth2_client::TokenBundle;
use crate::providers::Fetched;
use crate::services::{DashboardCredentials, SourceFailure};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// `GET /data` parameters, validated by hand so errors use the JSON envelope
#[derive(Debug, Deserialize)]
struct ReportQuery {
    date: Option<String>,
    lookback: Option<String>,
}

/// Date range parameters of the raw record endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// Report body; failed sources are listed only when there are any
#[derive(Debug, Serialize)]
struct ReportResponse {
    #[serde(flatten)]
    report: Report,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<SourceFailure>,
}

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/data", get(Self::handle_report))
            .route("/activities", get(Self::handle_activities))
            .route("/sleep", get(Self::handle_sleep))
            .route("/readiness", get(Self::handle_readiness))
            .route("/heartrate", get(Self::handle_heart_rate))
            .route("/stats/:athlete_id", get(Self::handle_athlete_stats))
            .route("/cache/flush", post(Self::handle_cache_flush))
            .with_state(state)
    }

    async fn handle_report(
        State(state): State<Arc<AppState>>,
        Query(params): Query<ReportQuery>,
    ) -> Result<Response, AppError> {
        let date = params.date.ok_or_else(|| AppError::missing_field("date"))?;
        let lookback = params
            .lookback
            .ok_or_else(|| AppError::missing_field("lookback"))?;
        let end_date = parse_date(&date, "date")?;
        let lookback_days: u32 = lookback
            .trim()
            .parse()
            .map_err(|_| AppError::invalid_input(format!("Invalid lookback parameter: {lookback}")))?;
        let window = ReportWindow::ending_on(end_date, lookback_days)?;

        let credentials = state.credentials().await;
        let outcome = state.service.build_report(&window, &credentials).await?;
        state.remember(outcome.rotated).await;

        let body = ReportResponse {
            report: outcome.report,
            failures: outcome.failures,
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    async fn handle_activities(
        State(state): State<Arc<AppState>>,
        Query(params): Query<RangeQuery>,
    ) -> Result<Response, AppError> {
        let (start, end) = params.validate()?;
        let credentials = state.credentials().await;
        let fetched = state.service.activities(&credentials, start, end).await?;
        Ok(respond_with(&state, fetched, strava_rotation).await)
    }

    async fn handle_sleep(
        State(state): State<Arc<AppState>>,
        Query(params): Query<RangeQuery>,
    ) -> Result<Response, AppError> {
        let (start, end) = params.validate()?;
        let credentials = state.credentials().await;
        let fetched = state.service.sleep(&credentials, start, end).await?;
        Ok(respond_with(&state, fetched, oura_rotation).await)
    }

    async fn handle_readiness(
        State(state): State<Arc<AppState>>,
        Query(params): Query<RangeQuery>,
    ) -> Result<Response, AppError> {
        let (start, end) = params.validate()?;
        let credentials = state.credentials().await;
        let fetched = state.service.readiness(&credentials, start, end).await?;
        Ok(respond_with(&state, fetched, oura_rotation).await)
    }

    async fn handle_heart_rate(
        State(state): State<Arc<AppState>>,
        Query(params): Query<RangeQuery>,
    ) -> Result<Response, AppError> {
        let (start, end) = params.validate()?;
        let credentials = state.credentials().await;
        let fetched = state.service.heart_rate(&credentials, start, end).await?;
        Ok(respond_with(&state, fetched, oura_rotation).await)
    }

    async fn handle_athlete_stats(
        State(state): State<Arc<AppState>>,
        Path(athlete_id): Path<u64>,
    ) -> Result<Response, AppError> {
        let credentials = state.credentials().await;
        let fetched = state.service.athlete_stats(&credentials, athlete_id).await?;
        Ok(respond_with(&state, fetched, strava_rotation).await)
    }

    async fn handle_cache_flush(State(state): State<Arc<AppState>>) -> AppResult<Response> {
        state.service.flush_cache().await?;
        info!("Cache flushed on request");
        Ok((StatusCode::OK, Json(serde_json::json!({ "flushed": true }))).into_response())
    }
}

impl RangeQuery {
    fn validate(self) -> AppResult<(NaiveDate, NaiveDate)> {
        let start = self
            .start_date
            .ok_or_else(|| AppError::missing_field("startDate"))?;
        let end = self
            .end_date
            .ok_or_else(|| AppError::missing_field("endDate"))?;
        let start = parse_date(&start, "startDate")?;
        let end = parse_date(&end, "endDate")?;
        if start > end {
            return Err(AppError::invalid_input("startDate must not be after endDate"));
        }
        Ok((start, end))
    }
}

fn parse_date(raw: &str, name: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::invalid_input(format!("Invalid {name} parameter: {raw}")))
}

fn strava_rotation(rotated: TokenBundle) -> DashboardCredentials {
    DashboardCredentials {
        strava: Some(rotated),
        oura: None,
    }
}

fn oura_rotation(rotated: TokenBundle) -> DashboardCredentials {
    DashboardCredentials {
        strava: None,
        oura: Some(rotated),
    }
}

async fn respond_with<T, F>(state: &AppState, fetched: Fetched<T>, rotation: F) -> Response
where
    T: Serialize,
    F: FnOnce(TokenBundle) -> DashboardCredentials,
{
    if let Some(rotated) = fetched.rotated {
        state.remember(rotation(rotated)).await;
    }
    (StatusCode::OK, Json(fetched.data)).into_response()
}
