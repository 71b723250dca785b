// ABOUTME: Credential lifecycle manager returning access tokens valid at the moment of use
// ABOUTME: Refreshes expired bundles once per refresh token no matter how many callers race
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::client::{OAuth2Client, TokenBundle, TokenRefresher};
use crate::errors::{AppResult, ProviderError};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Outcome of the exchange started for one refresh token
type RefreshSlot = Arc<Mutex<Option<Result<TokenBundle, ProviderError>>>>;

/// Keeps token bundles usable for one provider
///
/// Bundles are never mutated: an expired bundle is replaced by the one the
/// token endpoint returns. Callers racing on the same expired bundle share a
/// single exchange and all observe its outcome.
pub struct CredentialManager<R: TokenRefresher = OAuth2Client> {
    refresher: Arc<R>,
    in_flight: Arc<DashMap<String, RefreshSlot>>,
}

impl<R: TokenRefresher> Clone for CredentialManager<R> {
    fn clone(&self) -> Self {
        Self {
            refresher: Arc::clone(&self.refresher),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<R: TokenRefresher> CredentialManager<R> {
    /// Manager backed by `refresher`
    #[must_use]
    pub fn new(refresher: R) -> Self {
        Self {
            refresher: Arc::new(refresher),
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Provider this manager refreshes credentials for
    #[must_use]
    pub fn provider(&self) -> &str {
        self.refresher.provider()
    }

    /// Access token valid now, refreshing `bundle` first if it has expired
    ///
    /// # Errors
    ///
    /// Returns an external-auth error when the token endpoint rejects the
    /// refresh token
    pub async fn ensure_valid(&self, bundle: &TokenBundle) -> AppResult<String> {
        let resolved = self.resolve(bundle).await?;
        Ok(resolved.access_token)
    }

    /// Bundle valid now: `bundle` itself, or the one obtained by refreshing it
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::AuthFailed` when the exchange is rejected
    pub async fn resolve(&self, bundle: &TokenBundle) -> Result<TokenBundle, ProviderError> {
        if !bundle.is_expired() {
            return Ok(bundle.clone());
        }

        let slot = Arc::clone(
            self.in_flight
                .entry(bundle.refresh_token.clone())
                .or_default()
                .value(),
        );
        let mut outcome = slot.lock().await;

        match outcome.as_ref() {
            Some(Ok(fresh)) if !fresh.is_expired() => {
                debug!(provider = self.provider(), "Reusing concurrently refreshed token");
                return Ok(fresh.clone());
            }
            Some(Err(e)) => {
                let error = e.clone();
                drop(outcome);
                self.prune_stale_slots();
                return Err(error);
            }
            _ => {}
        }

        info!(provider = self.provider(), "Access token expired, refreshing");
        let result = self.refresher.refresh(&bundle.refresh_token).await;
        match &result {
            Ok(fresh) => info!(
                provider = self.provider(),
                expires_at = %fresh.expires_at,
                "Access token refreshed"
            ),
            Err(e) => warn!(provider = self.provider(), error = %e, "Token refresh rejected"),
        }
        *outcome = Some(result.clone());
        drop(outcome);

        self.prune_stale_slots();
        result
    }

    /// Number of refresh tokens with a retained exchange outcome
    #[must_use]
    pub fn tracked_refreshes(&self) -> usize {
        self.in_flight.len()
    }

    /// Forget finished exchanges whose outcome can no longer be reused
    ///
    /// Successful bundles stay until they expire so late callers still holding
    /// the rotated-away refresh token get the new bundle. Busy slots are kept.
    fn prune_stale_slots(&self) {
        self.in_flight.retain(|_, slot| {
            slot.try_lock().map_or(true, |outcome| {
                matches!(outcome.as_ref(), Some(Ok(fresh)) if !fresh.is_expired())
            })
        });
    }
}
