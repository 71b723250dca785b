// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, cache timings, provider endpoints and initial token bundles
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management

use crate::cache::CacheConfig;
use crate::constants::cache::{DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_TTL_SECS};
use crate::constants::providers::{oura, strava};
use crate::oauth2_client::{OAuth2Config, TokenBundle};
use crate::services::DashboardCredentials;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 3001;
/// Default dashboard origin allowed by CORS
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Cache timings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Default entry TTL in seconds (`CACHE_TTL`)
    pub ttl_secs: u64,
    /// Background sweep interval in seconds (`CACHE_SWEEP_INTERVAL_SECS`)
    pub sweep_interval_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl CacheSettings {
    /// Cache construction parameters
    #[must_use]
    pub const fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            default_ttl: Duration::from_secs(self.ttl_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
            enable_background_cleanup: true,
        }
    }
}

/// Endpoints, client credentials and initial tokens of one provider
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Provider name
    pub name: &'static str,
    /// OAuth client ID
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// REST API base URL
    pub api_base: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Bundle captured out of band, if any
    pub tokens: Option<TokenBundle>,
}

impl ProviderSettings {
    fn from_env(
        prefix: &str,
        name: &'static str,
        default_api_base: &str,
        default_token_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            name,
            client_id: non_empty_var(&format!("{prefix}_CLIENT_ID")),
            client_secret: non_empty_var(&format!("{prefix}_CLIENT_SECRET")),
            api_base: env_var_or(&format!("{prefix}_API_BASE"), default_api_base),
            token_url: env_var_or(&format!("{prefix}_TOKEN_URL"), default_token_url),
            tokens: tokens_from_env(prefix)?,
        })
    }

    /// Refresh client configuration; missing client credentials become empty
    /// strings and are rejected by the provider at refresh time
    #[must_use]
    pub fn oauth2_config(&self) -> OAuth2Config {
        OAuth2Config {
            provider: self.name.to_owned(),
            client_id: self.client_id.clone().unwrap_or_default(),
            client_secret: self.client_secret.clone().unwrap_or_default(),
            token_url: self.token_url.clone(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// CORS origin of the dashboard frontend
    pub frontend_url: String,
    /// Deployment environment
    pub environment: Environment,
    /// Cache timings
    pub cache: CacheSettings,
    /// Strava settings
    pub strava: ProviderSettings,
    /// Oura settings
    pub oura: ProviderSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric or timestamp variable does not parse
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT").or_else(|_| env::var("PORT")) {
            Ok(value) => value.parse().context("Invalid HTTP_PORT value")?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let config = Self {
            http_port,
            frontend_url: env_var_or("FRONTEND_URL", DEFAULT_FRONTEND_URL),
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            cache: CacheSettings {
                ttl_secs: parse_var_or("CACHE_TTL", DEFAULT_TTL_SECS)?,
                sweep_interval_secs: parse_var_or(
                    "CACHE_SWEEP_INTERVAL_SECS",
                    DEFAULT_SWEEP_INTERVAL_SECS,
                )?,
            },
            strava: ProviderSettings::from_env("STRAVA", strava::NAME, strava::API_BASE, strava::TOKEN_URL)?,
            oura: ProviderSettings::from_env("OURA", oura::NAME, oura::API_BASE, oura::TOKEN_URL)?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a zero TTL or sweep interval
    pub fn validate(&self) -> Result<()> {
        if self.cache.ttl_secs == 0 {
            return Err(anyhow::anyhow!("CACHE_TTL must be positive"));
        }
        if self.cache.sweep_interval_secs == 0 {
            return Err(anyhow::anyhow!("CACHE_SWEEP_INTERVAL_SECS must be positive"));
        }
        for provider in [&self.strava, &self.oura] {
            if provider.tokens.is_some()
                && (provider.client_id.is_none() || provider.client_secret.is_none())
            {
                warn!(
                    provider = provider.name,
                    "Tokens configured without client credentials; refresh will fail"
                );
            }
        }
        Ok(())
    }

    /// Token bundles present at startup
    #[must_use]
    pub fn initial_credentials(&self) -> DashboardCredentials {
        DashboardCredentials {
            strava: self.strava.tokens.clone(),
            oura: self.oura.tokens.clone(),
        }
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Marathon Dashboard Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Frontend URL: {}\n\
             - Cache TTL: {}s (sweep every {}s)\n\
             - Strava: {}\n\
             - Oura: {}",
            self.http_port,
            self.environment,
            self.frontend_url,
            self.cache.ttl_secs,
            self.cache.sweep_interval_secs,
            connection_state(&self.strava),
            connection_state(&self.oura),
        )
    }
}

const fn connection_state(provider: &ProviderSettings) -> &'static str {
    if provider.tokens.is_some() {
        "connected"
    } else {
        "not connected"
    }
}

/// Bundle from `{prefix}_ACCESS_TOKEN`, `{prefix}_REFRESH_TOKEN` and
/// `{prefix}_TOKEN_EXPIRES_AT` (Unix seconds)
///
/// A missing expiry marks the bundle expired so it is refreshed on first use.
fn tokens_from_env(prefix: &str) -> Result<Option<TokenBundle>> {
    let (Some(access_token), Some(refresh_token)) = (
        non_empty_var(&format!("{prefix}_ACCESS_TOKEN")),
        non_empty_var(&format!("{prefix}_REFRESH_TOKEN")),
    ) else {
        return Ok(None);
    };

    let expiry_var = format!("{prefix}_TOKEN_EXPIRES_AT");
    let expires_at = match non_empty_var(&expiry_var) {
        Some(raw) => {
            let secs: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {expiry_var} value"))?;
            DateTime::<Utc>::from_timestamp(secs, 0)
                .with_context(|| format!("{expiry_var} is out of range"))?
        }
        None => DateTime::<Utc>::UNIX_EPOCH,
    };

    Ok(Some(TokenBundle {
        access_token,
        refresh_token,
        expires_at,
    }))
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("production"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
    }

    #[test]
    fn test_cache_settings_convert_to_cache_config() {
        let settings = CacheSettings {
            ttl_secs: 120,
            sweep_interval_secs: 30,
        };
        let config = settings.cache_config();
        assert_eq!(config.default_ttl, Duration::from_secs(120));
        assert_eq!(config.sweep_interval, Duration::from_secs(30));
        assert!(config.enable_background_cleanup);
    }
}
