// ABOUTME: Route module organization for the dashboard HTTP endpoints
// ABOUTME: Shared application state and the assembled axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the service layer.

/// Dashboard data routes
pub mod dashboard;
/// Health check routes
pub mod health;

pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;

use crate::cache::memory::InMemoryCache;
use crate::cache::CacheProvider;
use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::services::{DashboardCredentials, DashboardService};
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;

/// State shared by every handler
pub struct AppState {
    /// Report orchestration
    pub service: DashboardService<InMemoryCache>,
    /// Current provider bundles; refreshed bundles replace these
    pub credentials: RwLock<DashboardCredentials>,
}

impl AppState {
    /// State over an existing service
    #[must_use]
    pub fn new(service: DashboardService<InMemoryCache>, credentials: DashboardCredentials) -> Self {
        Self {
            service,
            credentials: RwLock::new(credentials),
        }
    }

    /// Build the cache, providers and service described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be created
    pub async fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let cache = Arc::new(InMemoryCache::new(config.cache.cache_config()).await?);
        let service = DashboardService::from_config(config, cache);
        Ok(Self::new(service, config.initial_credentials()))
    }

    /// Snapshot of the current bundles
    pub async fn credentials(&self) -> DashboardCredentials {
        self.credentials.read().await.clone()
    }

    /// Keep bundles rotated during a request
    pub async fn remember(&self, rotated: DashboardCredentials) {
        if rotated.is_empty() {
            return;
        }
        self.credentials.write().await.apply(rotated);
    }
}

/// Every route of the service
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .nest("/api/dashboard", DashboardRoutes::routes(state))
}
