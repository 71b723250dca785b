// ABOUTME: Memoizing cache abstraction for upstream provider responses
// ABOUTME: Deterministic key derivation, per-namespace TTLs and a pluggable backend trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory cache implementation
pub mod memory;

use crate::constants::cache::{
    DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_TTL_SECS, NAMESPACE_ACTIVITIES, NAMESPACE_ATHLETE_STATS,
    NAMESPACE_HEART_RATE, NAMESPACE_READINESS, NAMESPACE_SLEEP, TTL_ATHLETE_STATS_SECS,
};
use crate::errors::AppResult;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Cache provider trait for pluggable backend implementations
///
/// Values are opaque to the cache; each call site picks its own type.
/// An entry is readable only while `now < stored_at + ttl`, regardless of
/// whether a background sweep has reclaimed it yet.
///
/// # Examples
///
/// ```rust,no_run
/// use marathon_dashboard::cache::{CacheConfig, CacheKey, CacheProvider};
/// use marathon_dashboard::cache::memory::InMemoryCache;
/// # async fn example() -> marathon_dashboard::errors::AppResult<()> {
/// let cache = InMemoryCache::new(CacheConfig {
///     enable_background_cleanup: false,
///     ..Default::default()
/// })
/// .await?;
///
/// let key = CacheKey::derive("oura:sleep", [("start", "2025-03-01"), ("end", "2025-03-07")]);
/// cache.set(&key, &vec![1_u32, 2, 3], None).await?;
///
/// let cached: Option<Vec<u32>> = cache.get(&key).await?;
/// assert_eq!(cached, Some(vec![1, 2, 3]));
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store a value; `None` uses the configured default TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Option<Duration>,
    ) -> AppResult<()>;

    /// Retrieve a value, `None` on a miss or an expired entry
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value does not deserialize as `T`
    async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> AppResult<Option<T>>;

    /// Whether a readable entry exists for `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried
    async fn has(&self, key: &CacheKey) -> AppResult<bool>;

    /// Remove a single entry
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be updated
    async fn invalidate(&self, key: &CacheKey) -> AppResult<()>;

    /// Drop every entry so the next read of any key is a genuine fetch
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be updated
    async fn invalidate_all(&self) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied when `set` is called without one
    pub default_ttl: Duration,
    /// Interval between sweeps of expired entries
    pub sweep_interval: Duration,
    /// Enable background sweep task (false in tests that do not need it)
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            enable_background_cleanup: true,
        }
    }
}

/// Cache key derived from a namespace prefix and named parameters
///
/// Parameter names are sorted before joining, so insertion order never changes
/// the key: `prefix:a=1&b=2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive a key from `prefix` and `params`
    pub fn derive<I, K, V>(prefix: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        let sorted: BTreeMap<String, String> = params
            .into_iter()
            .map(|(name, value)| (name.into(), value.to_string()))
            .collect();
        let joined = sorted
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        Self(format!("{prefix}:{joined}"))
    }

    /// Key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logical cache namespace per upstream query shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// Strava activity list for a time range
    Activities,
    /// Strava athlete statistics
    AthleteStats,
    /// Oura daily sleep for a date range
    Sleep,
    /// Oura daily readiness for a date range
    Readiness,
    /// Oura heart rate samples for a date range
    HeartRate,
}

impl CacheNamespace {
    /// Key prefix
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Activities => NAMESPACE_ACTIVITIES,
            Self::AthleteStats => NAMESPACE_ATHLETE_STATS,
            Self::Sleep => NAMESPACE_SLEEP,
            Self::Readiness => NAMESPACE_READINESS,
            Self::HeartRate => NAMESPACE_HEART_RATE,
        }
    }

    /// TTL override for this namespace, `None` for the configured default
    #[must_use]
    pub const fn ttl(self) -> Option<Duration> {
        match self {
            Self::AthleteStats => Some(Duration::from_secs(TTL_ATHLETE_STATS_SECS)),
            Self::Activities | Self::Sleep | Self::Readiness | Self::HeartRate => None,
        }
    }

    /// Derive a key in this namespace
    pub fn key<I, K, V>(self, params: I) -> CacheKey
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: fmt::Display,
    {
        CacheKey::derive(self.prefix(), params)
    }
}
