// ABOUTME: Oura Ring API v2 client for daily sleep, daily readiness and heart rate collections
// ABOUTME: Follows next_token pagination and memoizes each collection per date range
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{Fetched, ProviderApi};
use crate::cache::{CacheNamespace, CacheProvider};
use crate::constants::providers::oura::{DAILY_READINESS_PATH, DAILY_SLEEP_PATH, HEART_RATE_PATH, NAME};
use crate::errors::ProviderError;
use crate::models::{OuraCollection, OuraHeartRate, OuraReadiness, OuraSleep};
use crate::oauth2_client::{CredentialManager, TokenBundle};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Oura data source
pub struct OuraProvider<C: CacheProvider> {
    api: ProviderApi<C>,
}

impl<C: CacheProvider> OuraProvider<C> {
    /// Oura client rooted at `api_base` (normally `https://api.ouraring.com`)
    #[must_use]
    pub fn new(api_base: impl Into<String>, cache: Arc<C>, credentials: CredentialManager) -> Self {
        Self {
            api: ProviderApi::new(NAME, api_base, cache, credentials),
        }
    }

    /// Daily sleep records for `[start, end]`
    ///
    /// # Errors
    ///
    /// `AuthFailed` when the token cannot be refreshed; any other variant when
    /// a request fails
    #[instrument(skip(self, tokens), fields(provider = NAME))]
    pub async fn fetch_sleep(
        &self,
        tokens: &TokenBundle,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Fetched<Vec<OuraSleep>>, ProviderError> {
        self.fetch_collection(
            CacheNamespace::Sleep,
            DAILY_SLEEP_PATH,
            tokens,
            (start, end),
            date_params(start, end),
        )
        .await
    }

    /// Daily readiness records for `[start, end]`
    ///
    /// # Errors
    ///
    /// `AuthFailed` when the token cannot be refreshed; any other variant when
    /// a request fails
    #[instrument(skip(self, tokens), fields(provider = NAME))]
    pub async fn fetch_readiness(
        &self,
        tokens: &TokenBundle,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Fetched<Vec<OuraReadiness>>, ProviderError> {
        self.fetch_collection(
            CacheNamespace::Readiness,
            DAILY_READINESS_PATH,
            tokens,
            (start, end),
            date_params(start, end),
        )
        .await
    }

    /// Heart rate samples from the start of `start` through the end of `end` (UTC)
    ///
    /// # Errors
    ///
    /// `AuthFailed` when the token cannot be refreshed; any other variant when
    /// a request fails
    #[instrument(skip(self, tokens), fields(provider = NAME))]
    pub async fn fetch_heart_rate(
        &self,
        tokens: &TokenBundle,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Fetched<Vec<OuraHeartRate>>, ProviderError> {
        let params = [
            ("start_datetime", start.format("%Y-%m-%dT00:00:00Z").to_string()),
            ("end_datetime", end.format("%Y-%m-%dT23:59:59Z").to_string()),
        ];
        self.fetch_collection(
            CacheNamespace::HeartRate,
            HEART_RATE_PATH,
            tokens,
            (start, end),
            params,
        )
        .await
    }

    async fn fetch_collection<T>(
        &self,
        namespace: CacheNamespace,
        path: &str,
        tokens: &TokenBundle,
        (start, end): (NaiveDate, NaiveDate),
        range: [(&'static str, String); 2],
    ) -> Result<Fetched<Vec<T>>, ProviderError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let key = namespace.key([("start", start), ("end", end)]);
        if let Some(records) = self.api.cached(&key).await {
            return Ok(Fetched::cached(records));
        }

        let (access_token, rotated) = self.api.authorize(tokens).await?;
        let mut records = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let mut query = range.to_vec();
            if let Some(token) = next_token.take() {
                query.push(("next_token", token));
            }
            let page: OuraCollection<T> = self.api.get_json(path, &query, &access_token).await?;
            records.extend(page.data);
            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        info!(collection = namespace.prefix(), count = records.len(), "Fetched Oura collection");

        self.api.store(&key, &records, namespace.ttl()).await;
        Ok(Fetched {
            data: records,
            rotated,
        })
    }
}

fn date_params(start: NaiveDate, end: NaiveDate) -> [(&'static str, String); 2] {
    [
        ("start_date", start.format("%Y-%m-%d").to_string()),
        ("end_date", end.format("%Y-%m-%d").to_string()),
    ]
}
