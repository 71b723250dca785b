// ABOUTME: Strava API v3 client for the athlete's activity list and run totals
// ABOUTME: Paginates activity pages and memoizes responses per time range
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{Fetched, ProviderApi};
use crate::cache::{CacheNamespace, CacheProvider};
use crate::constants::providers::strava::{ACTIVITIES_PER_PAGE, NAME};
use crate::errors::ProviderError;
use crate::models::{ReportWindow, StravaActivity, StravaStats};
use crate::oauth2_client::{CredentialManager, TokenBundle};
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Strava data source
pub struct StravaProvider<C: CacheProvider> {
    api: ProviderApi<C>,
}

impl<C: CacheProvider> StravaProvider<C> {
    /// Strava client rooted at `api_base` (normally `https://www.strava.com/api/v3`)
    #[must_use]
    pub fn new(api_base: impl Into<String>, cache: Arc<C>, credentials: CredentialManager) -> Self {
        Self {
            api: ProviderApi::new(NAME, api_base, cache, credentials),
        }
    }

    /// Every activity started in `[after, before)` (Unix seconds)
    ///
    /// Pages of `per_page=200` are requested until a short page comes back.
    /// The whole list is cached under the time range.
    ///
    /// # Errors
    ///
    /// `AuthFailed` when the token cannot be refreshed; any other variant when
    /// a page request fails
    #[instrument(skip(self, tokens), fields(provider = NAME))]
    pub async fn fetch_activities(
        &self,
        tokens: &TokenBundle,
        after: i64,
        before: i64,
    ) -> Result<Fetched<Vec<StravaActivity>>, ProviderError> {
        let key = CacheNamespace::Activities.key([("after", after), ("before", before)]);
        if let Some(activities) = self.api.cached(&key).await {
            return Ok(Fetched::cached(activities));
        }

        let (access_token, rotated) = self.api.authorize(tokens).await?;
        let mut activities: Vec<StravaActivity> = Vec::new();
        let mut page = 1_u32;
        loop {
            let query = [
                ("after", after.to_string()),
                ("before", before.to_string()),
                ("page", page.to_string()),
                ("per_page", ACTIVITIES_PER_PAGE.to_string()),
            ];
            let batch: Vec<StravaActivity> = self
                .api
                .get_json("/athlete/activities", &query, &access_token)
                .await?;
            debug!(page, count = batch.len(), "Fetched Strava activity page");

            let short_page = batch.len() < ACTIVITIES_PER_PAGE as usize;
            activities.extend(batch);
            if short_page {
                break;
            }
            page += 1;
        }
        info!(count = activities.len(), pages = page, "Fetched Strava activities");

        self.api
            .store(&key, &activities, CacheNamespace::Activities.ttl())
            .await;
        Ok(Fetched {
            data: activities,
            rotated,
        })
    }

    /// Activities covering `window` and the same-length window before it
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_activities`]
    pub async fn fetch_window(
        &self,
        tokens: &TokenBundle,
        window: &ReportWindow,
    ) -> Result<Fetched<Vec<StravaActivity>>, ProviderError> {
        let (after, before) = activity_bounds(window.previous_start(), window.end_date());
        self.fetch_activities(tokens, after, before).await
    }

    /// Activities whose local start day falls within `[start, end]`
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_activities`]
    pub async fn fetch_range(
        &self,
        tokens: &TokenBundle,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Fetched<Vec<StravaActivity>>, ProviderError> {
        let (after, before) = activity_bounds(start, end);
        let mut fetched = self.fetch_activities(tokens, after, before).await?;
        let (first, last) = (start.to_string(), end.to_string());
        fetched
            .data
            .retain(|activity| (first.as_str()..=last.as_str()).contains(&activity.local_day()));
        Ok(fetched)
    }

    /// Recent, year-to-date and all-time run totals of an athlete
    ///
    /// # Errors
    ///
    /// `AuthFailed` when the token cannot be refreshed; any other variant when
    /// the request fails
    #[instrument(skip(self, tokens), fields(provider = NAME))]
    pub async fn fetch_athlete_stats(
        &self,
        tokens: &TokenBundle,
        athlete_id: u64,
    ) -> Result<Fetched<StravaStats>, ProviderError> {
        let key = CacheNamespace::AthleteStats.key([("athleteId", athlete_id)]);
        if let Some(stats) = self.api.cached(&key).await {
            return Ok(Fetched::cached(stats));
        }

        let (access_token, rotated) = self.api.authorize(tokens).await?;
        let stats: StravaStats = self
            .api
            .get_json(&format!("/athletes/{athlete_id}/stats"), &[], &access_token)
            .await?;

        self.api
            .store(&key, &stats, CacheNamespace::AthleteStats.ttl())
            .await;
        Ok(Fetched {
            data: stats,
            rotated,
        })
    }
}

/// Unix-second bounds covering local days `[start, end]` in any time zone
///
/// Strava filters on the UTC start time while days are assigned by local
/// start time, so the bounds run from midnight UTC the day before `start` to
/// midnight UTC two days after `end`. Callers drop activities outside the
/// local range.
#[must_use]
pub fn activity_bounds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let after = start
        .checked_sub_days(Days::new(1))
        .and_then(|previous| previous.and_hms_opt(0, 0, 0))
        .map_or(0, |t| t.and_utc().timestamp());
    let before = end
        .checked_add_days(Days::new(2))
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .map_or(i64::MAX, |t| t.and_utc().timestamp());
    (after, before)
}
