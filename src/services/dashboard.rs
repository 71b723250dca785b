// ABOUTME: Dashboard report orchestration over Strava, Oura, the cache and the aggregation engine
// ABOUTME: Fetches the three sources concurrently and degrades each failed source to empty data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::CacheProvider;
use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult, ProviderError};
use crate::intelligence::aggregate;
use crate::models::{
    OuraHeartRate, OuraReadiness, OuraSleep, Report, ReportWindow, StravaActivity, StravaStats,
};
use crate::oauth2_client::{CredentialManager, OAuth2Client, TokenBundle};
use crate::providers::{Fetched, OuraProvider, StravaProvider};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Token bundles for the providers the user has connected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardCredentials {
    /// Strava bundle
    pub strava: Option<TokenBundle>,
    /// Oura bundle
    pub oura: Option<TokenBundle>,
}

impl DashboardCredentials {
    /// Whether no provider is connected
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.strava.is_none() && self.oura.is_none()
    }

    /// Replace bundles with the ones rotated during a request
    pub fn apply(&mut self, rotated: Self) {
        if let Some(strava) = rotated.strava {
            self.strava = Some(strava);
        }
        if let Some(oura) = rotated.oura {
            self.oura = Some(oura);
        }
    }
}

/// One of the three record streams feeding the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Strava activities
    Activities,
    /// Oura daily sleep
    Sleep,
    /// Oura daily readiness
    Readiness,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Activities => "activities",
            Self::Sleep => "sleep",
            Self::Readiness => "readiness",
        })
    }
}

/// A source that degraded to empty data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFailure {
    /// Affected stream
    pub source: DataSource,
    /// Provider name
    pub provider: String,
    /// Failure description
    pub message: String,
    /// The provider rejected the stored refresh token
    pub requires_reauthorization: bool,
}

impl SourceFailure {
    fn new(source: DataSource, error: &ProviderError) -> Self {
        Self {
            source,
            provider: error.provider().to_owned(),
            message: error.to_string(),
            requires_reauthorization: error.requires_reauthorization(),
        }
    }
}

/// Report plus what happened on the way
#[derive(Debug, Clone)]
pub struct DashboardOutcome {
    /// Aggregated report
    pub report: Report,
    /// Sources that contributed no data because their fetch failed
    pub failures: Vec<SourceFailure>,
    /// Bundles replaced by a refresh during this request
    pub rotated: DashboardCredentials,
}

/// Builds dashboard reports from the connected providers
pub struct DashboardService<C: CacheProvider> {
    cache: Arc<C>,
    strava: StravaProvider<C>,
    oura: OuraProvider<C>,
}

impl<C: CacheProvider> DashboardService<C> {
    /// Service over the given providers; `cache` is the instance they share
    #[must_use]
    pub const fn new(cache: Arc<C>, strava: StravaProvider<C>, oura: OuraProvider<C>) -> Self {
        Self {
            cache,
            strava,
            oura,
        }
    }

    /// Service wired from configuration, sharing `cache` between both providers
    #[must_use]
    pub fn from_config(config: &ServerConfig, cache: Arc<C>) -> Self {
        let strava = StravaProvider::new(
            config.strava.api_base.clone(),
            Arc::clone(&cache),
            CredentialManager::new(OAuth2Client::new(config.strava.oauth2_config())),
        );
        let oura = OuraProvider::new(
            config.oura.api_base.clone(),
            Arc::clone(&cache),
            CredentialManager::new(OAuth2Client::new(config.oura.oauth2_config())),
        );
        Self::new(cache, strava, oura)
    }

    /// Report for `window` from whichever providers are connected
    ///
    /// The three fetches run concurrently. A failed fetch contributes an empty
    /// record list and a [`SourceFailure`]; the report is still produced.
    ///
    /// # Errors
    ///
    /// `AuthRequired` when neither provider is connected
    #[instrument(skip(self, credentials), fields(start = %window.start_date(), end = %window.end_date()))]
    pub async fn build_report(
        &self,
        window: &ReportWindow,
        credentials: &DashboardCredentials,
    ) -> AppResult<DashboardOutcome> {
        if credentials.is_empty() {
            return Err(AppError::auth_required());
        }

        let (activities, sleep, readiness) = tokio::join!(
            async {
                match &credentials.strava {
                    Some(tokens) => self.strava.fetch_window(tokens, window).await.map(Some),
                    None => Ok(None),
                }
            },
            async {
                match &credentials.oura {
                    Some(tokens) => self
                        .oura
                        .fetch_sleep(tokens, window.start_date(), window.end_date())
                        .await
                        .map(Some),
                    None => Ok(None),
                }
            },
            async {
                match &credentials.oura {
                    Some(tokens) => self
                        .oura
                        .fetch_readiness(tokens, window.start_date(), window.end_date())
                        .await
                        .map(Some),
                    None => Ok(None),
                }
            },
        );

        let mut failures = Vec::new();
        let mut rotated = DashboardCredentials::default();
        let activities: Vec<StravaActivity> = settle(
            DataSource::Activities,
            activities,
            &mut failures,
            &mut rotated.strava,
        );
        let sleep: Vec<OuraSleep> = settle(DataSource::Sleep, sleep, &mut failures, &mut rotated.oura);
        let readiness: Vec<OuraReadiness> = settle(
            DataSource::Readiness,
            readiness,
            &mut failures,
            &mut rotated.oura,
        );

        let report = aggregate(&activities, &sleep, &readiness, window);
        info!(
            sessions = report.kpis.total_training_sessions,
            failed_sources = failures.len(),
            "Dashboard report built"
        );
        Ok(DashboardOutcome {
            report,
            failures,
            rotated,
        })
    }

    /// Raw Strava activities dated within `[start, end]`, empty when Strava is not connected
    ///
    /// # Errors
    ///
    /// Propagates the provider failure
    pub async fn activities(
        &self,
        credentials: &DashboardCredentials,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Fetched<Vec<StravaActivity>>> {
        match &credentials.strava {
            Some(tokens) => Ok(self.strava.fetch_range(tokens, start, end).await?),
            None => Ok(empty()),
        }
    }

    /// Raw Oura sleep records for `[start, end]`, empty when Oura is not connected
    ///
    /// # Errors
    ///
    /// Propagates the provider failure
    pub async fn sleep(
        &self,
        credentials: &DashboardCredentials,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Fetched<Vec<OuraSleep>>> {
        match &credentials.oura {
            Some(tokens) => Ok(self.oura.fetch_sleep(tokens, start, end).await?),
            None => Ok(empty()),
        }
    }

    /// Raw Oura readiness records for `[start, end]`, empty when Oura is not connected
    ///
    /// # Errors
    ///
    /// Propagates the provider failure
    pub async fn readiness(
        &self,
        credentials: &DashboardCredentials,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Fetched<Vec<OuraReadiness>>> {
        match &credentials.oura {
            Some(tokens) => Ok(self.oura.fetch_readiness(tokens, start, end).await?),
            None => Ok(empty()),
        }
    }

    /// Raw Oura heart rate samples for `[start, end]`, empty when Oura is not connected
    ///
    /// # Errors
    ///
    /// Propagates the provider failure
    pub async fn heart_rate(
        &self,
        credentials: &DashboardCredentials,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Fetched<Vec<OuraHeartRate>>> {
        match &credentials.oura {
            Some(tokens) => Ok(self.oura.fetch_heart_rate(tokens, start, end).await?),
            None => Ok(empty()),
        }
    }

    /// Strava run totals of `athlete_id`
    ///
    /// # Errors
    ///
    /// `AuthRequired` when Strava is not connected, otherwise the provider failure
    pub async fn athlete_stats(
        &self,
        credentials: &DashboardCredentials,
        athlete_id: u64,
    ) -> AppResult<Fetched<StravaStats>> {
        let tokens = credentials
            .strava
            .as_ref()
            .ok_or_else(AppError::auth_required)?;
        Ok(self.strava.fetch_athlete_stats(tokens, athlete_id).await?)
    }

    /// Drop every memoized provider response
    ///
    /// # Errors
    ///
    /// Propagates the cache failure
    pub async fn flush_cache(&self) -> AppResult<()> {
        self.cache.invalidate_all().await?;
        info!("Dashboard cache flushed");
        Ok(())
    }
}

const fn empty<T>() -> Fetched<Vec<T>> {
    Fetched {
        data: Vec::new(),
        rotated: None,
    }
}

/// Success value of a settled fetch, or an empty list plus a recorded failure
fn settle<T>(
    source: DataSource,
    result: Result<Option<Fetched<Vec<T>>>, ProviderError>,
    failures: &mut Vec<SourceFailure>,
    rotated: &mut Option<TokenBundle>,
) -> Vec<T> {
    match result {
        Ok(Some(fetched)) => {
            if fetched.rotated.is_some() {
                *rotated = fetched.rotated;
            }
            fetched.data
        }
        Ok(None) => Vec::new(),
        Err(error) => {
            warn!(%source, error = %error, "Source fetch failed, continuing without it");
            failures.push(SourceFailure::new(source, &error));
            Vec::new()
        }
    }
}
