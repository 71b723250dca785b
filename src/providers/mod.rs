// ABOUTME: Upstream data sources for the dashboard: Strava activities and Oura recovery data
// ABOUTME: Shared cache-aside plumbing and authenticated JSON requests for both providers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Providers
//!
//! Each provider fetch follows the same shape:
//! 1. derive the cache key from the namespace and request parameters
//! 2. return the cached value when readable, without touching credentials
//! 3. otherwise resolve a valid token, fetch every page and populate the cache
//!
//! Cache failures never fail a fetch: they are logged and treated as misses.

/// Oura Ring daily sleep and readiness
pub mod oura;
/// Strava activities and athlete stats
pub mod strava;

pub use oura::OuraProvider;
pub use strava::StravaProvider;

use crate::cache::{CacheKey, CacheProvider};
use crate::errors::ProviderError;
use crate::oauth2_client::{CredentialManager, TokenBundle};
use crate::utils::http_client::api_client;
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Data returned by a provider fetch
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    /// The fetched or cached value
    pub data: T,
    /// Bundle that replaced the caller's expired one, if a refresh happened
    pub rotated: Option<TokenBundle>,
}

impl<T> Fetched<T> {
    const fn cached(data: T) -> Self {
        Self {
            data,
            rotated: None,
        }
    }
}

/// Authenticated JSON client shared by the provider implementations
pub(crate) struct ProviderApi<C: CacheProvider> {
    name: &'static str,
    api_base: String,
    http: reqwest::Client,
    cache: Arc<C>,
    credentials: CredentialManager,
}

impl<C: CacheProvider> ProviderApi<C> {
    pub(crate) fn new(
        name: &'static str,
        api_base: impl Into<String>,
        cache: Arc<C>,
        credentials: CredentialManager,
    ) -> Self {
        Self {
            name,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            http: api_client(),
            cache,
            credentials,
        }
    }

    /// Cached value for `key`; read errors count as a miss
    pub(crate) async fn cached<T>(&self, key: &CacheKey) -> Option<T>
    where
        T: DeserializeOwned + Send + Sync,
    {
        match self.cache.get::<T>(key).await {
            Ok(Some(hit)) => {
                debug!(target: "marathon::cache", cache_hit = true, key = %key, provider = self.name, "Cache hit");
                Some(hit)
            }
            Ok(None) => {
                debug!(target: "marathon::cache", cache_hit = false, key = %key, provider = self.name, "Cache miss");
                None
            }
            Err(e) => {
                warn!(target: "marathon::cache", error = %e, key = %key, "Cache read error, fetching from provider");
                None
            }
        }
    }

    /// Populate `key` (best effort)
    pub(crate) async fn store<T>(&self, key: &CacheKey, value: &T, ttl: Option<Duration>)
    where
        T: Serialize + Send + Sync,
    {
        if let Err(e) = self.cache.set(key, value, ttl).await {
            warn!(target: "marathon::cache", error = %e, key = %key, "Failed to cache provider response");
        }
    }

    /// Token bundle valid now, plus the bundle to hand back if it changed
    pub(crate) async fn authorize(
        &self,
        tokens: &TokenBundle,
    ) -> Result<(String, Option<TokenBundle>), ProviderError> {
        let resolved = self.credentials.resolve(tokens).await?;
        let access_token = resolved.access_token.clone();
        let rotated = (resolved != *tokens).then_some(resolved);
        Ok((access_token, rotated))
    }

    /// `GET {api_base}{path}` with bearer auth, decoded as JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        access_token: &str,
    ) -> Result<T, ProviderError> {
        let url = format!("{}{path}", self.api_base);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(self.name, &e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok());
            return Err(ProviderError::RateLimited {
                provider: self.name.to_owned(),
                retry_after_secs,
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                provider: self.name.to_owned(),
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse {
                provider: self.name.to_owned(),
                message: e.to_string(),
            })
    }
}
