// ABOUTME: OAuth2 refresh-token exchange against provider token endpoints
// ABOUTME: Builds new token bundles and maps rejected exchanges to auth failures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::providers::DEFAULT_TOKEN_EXPIRY_SECONDS;
use crate::errors::ProviderError;
use crate::utils::http_client::oauth_client;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// OAuth 2.0 client configuration for one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// Provider name (`strava`, `oura`)
    pub provider: String,
    /// OAuth client ID from provider
    pub client_id: String,
    /// OAuth client secret from provider
    pub client_secret: String,
    /// Token endpoint URL
    pub token_url: String,
}

/// Access token, refresh token and the absolute instant the access token expires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBundle {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token presented to the token endpoint to obtain a new bundle
    pub refresh_token: String,
    /// Expiry instant (UTC)
    pub expires_at: DateTime<Utc>,
}

impl TokenBundle {
    /// Bundle expiring `expires_in_secs` from now
    #[must_use]
    pub fn expiring_in(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in_secs: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }

    /// Whether the access token is unusable at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the access token is unusable now
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Exchanges a refresh token for a new bundle
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Provider name used in logs and errors
    fn provider(&self) -> &str;

    /// Present `refresh_token` to the token endpoint
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::AuthFailed` carrying the provider's error code
    /// and description when the exchange is rejected or cannot complete
    async fn refresh(&self, refresh_token: &str) -> Result<TokenBundle, ProviderError>;
}

/// OAuth 2.0 client for provider token endpoints
pub struct OAuth2Client {
    config: OAuth2Config,
    client: reqwest::Client,
}

impl OAuth2Client {
    /// Create a new `OAuth2` client with the given configuration
    #[must_use]
    pub fn new(config: OAuth2Config) -> Self {
        Self {
            config,
            client: oauth_client(),
        }
    }

    fn auth_failed(&self, code: impl Into<String>, description: impl Into<String>) -> ProviderError {
        ProviderError::AuthFailed {
            provider: self.config.provider.clone(),
            code: code.into(),
            description: description.into(),
        }
    }

    fn bundle_from_response(response: TokenResponse, previous_refresh: &str) -> TokenBundle {
        let expires_in = response
            .expires_in
            .unwrap_or(DEFAULT_TOKEN_EXPIRY_SECONDS);
        TokenBundle {
            access_token: response.access_token,
            // Providers that do not rotate refresh tokens omit the field
            refresh_token: response
                .refresh_token
                .unwrap_or_else(|| previous_refresh.to_owned()),
            expires_at: Utc::now() + Duration::seconds(expires_in),
        }
    }
}

#[async_trait]
impl TokenRefresher for OAuth2Client {
    fn provider(&self) -> &str {
        &self.config.provider
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenBundle, ProviderError> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| self.auth_failed("request_failed", e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.auth_failed("request_failed", e.to_string()))?;

        if !status.is_success() {
            let rejection = serde_json::from_str::<TokenErrorResponse>(&body).unwrap_or_default();
            let code = rejection
                .error
                .or_else(|| rejection.errors.into_iter().find_map(|detail| detail.code))
                .unwrap_or_else(|| status.as_u16().to_string());
            let description = rejection
                .error_description
                .or(rejection.message)
                .unwrap_or(body);
            return Err(self.auth_failed(code, description));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| self.auth_failed("invalid_response", e.to_string()))?;
        Ok(Self::bundle_from_response(token, refresh_token))
    }
}

/// OAuth 2.0 token response from provider
#[derive(Debug, Deserialize)]
struct TokenResponse {
    /// The access token issued by the authorization server
    access_token: String,
    /// Rotated refresh token
    refresh_token: Option<String>,
    /// Token lifetime in seconds
    expires_in: Option<i64>,
}

/// Error body of a rejected exchange
///
/// Oura uses the RFC 6749 `error`/`error_description` pair; Strava sends a
/// `message` with a list of field errors.
#[derive(Debug, Default, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    code: Option<String>,
}
