// ABOUTME: In-memory cache implementation with read-time TTL expiry
// ABOUTME: Sharded map for per-key concurrency plus a background sweep of expired entries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{CacheConfig, CacheKey, CacheProvider};
use crate::errors::AppResult;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// In-memory cache entry
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
            ttl,
        }
    }

    fn is_readable_at(&self, now: Instant) -> bool {
        // A TTL too large to represent never expires
        self.stored_at
            .checked_add(self.ttl)
            .map_or(true, |expires_at| now < expires_at)
    }
}

/// Stops the sweep task once the last cache clone is dropped
struct SweepHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown_tx.try_send(()) {
            tracing::debug!(error = ?e, "Cache shutdown signal send failed (channel likely closed)");
        }
    }
}

/// In-memory cache with TTL expiry and background sweep
///
/// `DashMap` shards the store so independent keys never contend on one lock.
/// The sweep only reclaims memory; reads check expiry themselves.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<DashMap<String, CacheEntry>>,
    default_ttl: Duration,
    sweeper: Option<Arc<SweepHandle>>,
}

impl InMemoryCache {
    fn new_with_config(config: &CacheConfig) -> Self {
        let store = Arc::new(DashMap::new());

        let sweeper = if config.enable_background_cleanup {
            let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
            let store_clone = Arc::clone(&store);
            let sweep_interval = config.sweep_interval;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(sweep_interval);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            Self::sweep(&store_clone);
                        }
                        _ = shutdown_rx.recv() => {
                            tracing::debug!("Cache sweep task received shutdown signal");
                            break;
                        }
                    }
                }
            });

            Some(Arc::new(SweepHandle { shutdown_tx }))
        } else {
            None
        };

        Self {
            store,
            default_ttl: config.default_ttl,
            sweeper,
        }
    }

    /// Remove expired entries, returning how many were reclaimed
    fn sweep(store: &DashMap<String, CacheEntry>) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        store.retain(|_, entry| {
            let keep = entry.is_readable_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            tracing::debug!("Swept {removed} expired cache entries");
        }
        removed
    }

    /// Reclaim expired entries now instead of waiting for the next sweep
    pub fn purge_expired(&self) -> usize {
        Self::sweep(&self.store)
    }

    /// Entries physically resident, including expired ones not yet swept
    #[must_use]
    pub fn resident_entries(&self) -> usize {
        self.store.len()
    }

    /// Whether the background sweep task is running for this cache
    #[must_use]
    pub fn has_background_sweep(&self) -> bool {
        self.sweeper.is_some()
    }
}

#[async_trait::async_trait]
impl CacheProvider for InMemoryCache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        Ok(Self::new_with_config(&config))
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Option<Duration>,
    ) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        let entry = CacheEntry::new(serialized, ttl.unwrap_or(self.default_ttl));
        self.store.insert(key.as_str().to_owned(), entry);
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        let now = Instant::now();
        let Some(entry) = self.store.get(key.as_str()) else {
            return Ok(None);
        };

        if !entry.is_readable_at(now) {
            // Release the shard guard before removing from the same shard
            drop(entry);
            self.store
                .remove_if(key.as_str(), |_, stale| !stale.is_readable_at(now));
            return Ok(None);
        }

        let value: T = serde_json::from_slice(&entry.data)?;
        drop(entry);
        Ok(Some(value))
    }

    async fn has(&self, key: &CacheKey) -> AppResult<bool> {
        let now = Instant::now();
        Ok(self
            .store
            .get(key.as_str())
            .is_some_and(|entry| entry.is_readable_at(now)))
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        self.store.remove(key.as_str());
        Ok(())
    }

    async fn invalidate_all(&self) -> AppResult<()> {
        self.store.clear();
        Ok(())
    }
}
