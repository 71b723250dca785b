// ABOUTME: Structured error types for upstream provider operations
// ABOUTME: Separates credential failures from recoverable data fetch failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Failure talking to an upstream provider
///
/// `AuthFailed` is the credential refresh rejection and is never retried: the
/// caller has to restart the authorization flow. Every other variant is a data
/// fetch failure which the dashboard degrades to an empty record list.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider rejected a refresh token exchange
    #[error("{provider} rejected the token refresh ({code}): {description}")]
    AuthFailed {
        /// Provider name
        provider: String,
        /// Provider error code, e.g. `invalid_grant`
        code: String,
        /// Provider error description
        description: String,
    },

    /// The provider throttled the request
    #[error("{provider} rate limit exceeded")]
    RateLimited {
        /// Provider name
        provider: String,
        /// Seconds until the limit resets, when the provider says so
        retry_after_secs: Option<u64>,
    },

    /// The provider answered with a non-success status
    #[error("{provider} API error {status}: {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The request never produced a response
    #[error("{provider} request failed: {message}")]
    Network {
        /// Provider name
        provider: String,
        /// Transport error message
        message: String,
    },

    /// The response body could not be decoded
    #[error("{provider} returned an invalid response: {message}")]
    InvalidResponse {
        /// Provider name
        provider: String,
        /// Decode error message
        message: String,
    },
}

impl ProviderError {
    /// Provider that produced the error
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::AuthFailed { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::Network { provider, .. }
            | Self::InvalidResponse { provider, .. } => provider,
        }
    }

    /// Whether the user has to authorize the provider again
    #[must_use]
    pub const fn requires_reauthorization(&self) -> bool {
        matches!(self, Self::AuthFailed { .. })
    }

    /// Classify a transport error from `reqwest`
    #[cfg(feature = "provider-errors")]
    #[must_use]
    pub fn from_reqwest(provider: &str, error: &reqwest::Error) -> Self {
        if error.is_decode() {
            Self::InvalidResponse {
                provider: provider.to_owned(),
                message: error.to_string(),
            }
        } else {
            Self::Network {
                provider: provider.to_owned(),
                message: error.to_string(),
            }
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::AuthFailed { .. } => ErrorCode::ExternalAuthFailed,
            ProviderError::RateLimited { .. } => ErrorCode::ExternalRateLimited,
            ProviderError::ApiError { .. } | ProviderError::InvalidResponse { .. } => {
                ErrorCode::ExternalServiceError
            }
            ProviderError::Network { .. } => ErrorCode::ExternalServiceUnavailable,
        };
        let details = match &error {
            ProviderError::AuthFailed {
                provider,
                code,
                description,
            } => serde_json::json!({
                "provider": provider,
                "provider_error": code,
                "provider_error_description": description,
            }),
            other => serde_json::json!({ "provider": other.provider() }),
        };
        Self::new(code, error.to_string()).with_details(details)
    }
}
