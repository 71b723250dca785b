// ABOUTME: Tests for the credential lifecycle manager and the OAuth2 token endpoint client
// ABOUTME: Covers no-op on valid tokens, single-flight refresh, rotation and rejected exchanges
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use chrono::Utc;
use common::{expired_bundle, fresh_bundle, init_test_logging, spawn_upstream};
use marathon_dashboard::errors::{ErrorCode, ProviderError};
use marathon_dashboard::oauth2_client::{
    CredentialManager, OAuth2Client, OAuth2Config, TokenBundle, TokenRefresher,
};
use serde_json::json;
use tokio::task::JoinSet;

/// Refresher that counts exchanges and answers after a short delay
struct CountingRefresher {
    calls: Arc<AtomicUsize>,
    reject: bool,
}

impl CountingRefresher {
    fn new(reject: bool) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                reject,
            },
            calls,
        )
    }
}

#[async_trait]
impl TokenRefresher for CountingRefresher {
    fn provider(&self) -> &str {
        "strava"
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenBundle, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(Duration::from_millis(50)).await;
        if self.reject {
            return Err(ProviderError::AuthFailed {
                provider: "strava".to_owned(),
                code: "invalid_grant".to_owned(),
                description: "Bad Request".to_owned(),
            });
        }
        Ok(TokenBundle::expiring_in(
            format!("access-{call}"),
            format!("{refresh_token}-rotated"),
            3_600,
        ))
    }
}

#[tokio::test]
async fn test_valid_bundle_is_returned_without_refresh() -> Result<()> {
    let (refresher, calls) = CountingRefresher::new(false);
    let manager = CredentialManager::new(refresher);
    let bundle = fresh_bundle("access-0", "refresh-0");

    let token = manager.ensure_valid(&bundle).await?;
    let resolved = manager.resolve(&bundle).await?;

    assert_eq!(token, "access-0");
    assert_eq!(resolved, bundle);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(manager.tracked_refreshes(), 0);
    Ok(())
}

#[tokio::test]
async fn test_expired_bundle_is_refreshed_and_rotated() -> Result<()> {
    let (refresher, calls) = CountingRefresher::new(false);
    let manager = CredentialManager::new(refresher);
    let bundle = expired_bundle("stale", "refresh-0");

    let resolved = manager.resolve(&bundle).await?;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(resolved.access_token, "access-1");
    assert_eq!(resolved.refresh_token, "refresh-0-rotated");
    assert!(!resolved.is_expired());
    assert!(bundle.is_expired());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_callers_share_one_refresh() -> Result<()> {
    init_test_logging();
    let (refresher, calls) = CountingRefresher::new(false);
    let manager = CredentialManager::new(refresher);
    let bundle = expired_bundle("stale", "refresh-0");

    let mut tasks = JoinSet::new();
    for _ in 0..10 {
        let manager = manager.clone();
        let bundle = bundle.clone();
        tasks.spawn(async move { manager.ensure_valid(&bundle).await });
    }

    let mut tokens = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        tokens.push(joined??);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(tokens.len(), 10);
    assert!(tokens.iter().all(|token| token == "access-1"));
    Ok(())
}

#[tokio::test]
async fn test_rotated_away_refresh_token_reuses_fresh_bundle() -> Result<()> {
    let (refresher, calls) = CountingRefresher::new(false);
    let manager = CredentialManager::new(refresher);
    let bundle = expired_bundle("stale", "refresh-0");

    let first = manager.resolve(&bundle).await?;
    // A caller still holding the old bundle must not spend the old refresh token again
    let second = manager.resolve(&bundle).await?;

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(manager.tracked_refreshes(), 1);
    Ok(())
}

#[tokio::test]
async fn test_rejected_refresh_reaches_every_waiter() -> Result<()> {
    let (refresher, calls) = CountingRefresher::new(true);
    let manager = CredentialManager::new(refresher);
    let bundle = expired_bundle("stale", "revoked");

    let (first, second) = tokio::join!(manager.resolve(&bundle), manager.resolve(&bundle));

    for outcome in [first, second] {
        let error = outcome.expect_err("refresh must fail");
        assert!(error.requires_reauthorization());
        assert!(matches!(
            &error,
            ProviderError::AuthFailed { code, .. } if code == "invalid_grant"
        ));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // Failed exchanges are forgotten so a later attempt can retry
    assert_eq!(manager.tracked_refreshes(), 0);
    Ok(())
}

#[tokio::test]
async fn test_rejected_refresh_maps_to_external_auth_error() -> Result<()> {
    let (refresher, _calls) = CountingRefresher::new(true);
    let manager = CredentialManager::new(refresher);

    let error = manager
        .ensure_valid(&expired_bundle("stale", "revoked"))
        .await
        .expect_err("refresh must fail");

    assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
    let details = error.details.expect("provider details");
    assert_eq!(details["provider_error"], "invalid_grant");
    Ok(())
}

/// Token endpoint that accepts `good-refresh` and rejects everything else
async fn token_endpoint(
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let grant = form.get("grant_type").map(String::as_str);
    let client_id = form.get("client_id").map(String::as_str);
    let refresh = form.get("refresh_token").map(String::as_str);
    match (grant, client_id, refresh) {
        (Some("refresh_token"), Some("client-123"), Some("good-refresh")) => (
            StatusCode::OK,
            Json(json!({
                "access_token": "new-access",
                "refresh_token": "new-refresh",
                "expires_in": 21_600,
                "token_type": "Bearer",
            })),
        ),
        (Some("refresh_token"), Some("client-123"), Some("keep-refresh")) => (
            StatusCode::OK,
            Json(json!({ "access_token": "kept-access" })),
        ),
        (_, _, Some("strava-style")) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": "Bad Request",
                "errors": [{ "resource": "RefreshToken", "field": "refresh_token", "code": "invalid" }],
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "The refresh token is invalid or expired",
            })),
        ),
    }
}

async fn token_client() -> Result<OAuth2Client> {
    let base = spawn_upstream(Router::new().route("/oauth/token", post(token_endpoint))).await?;
    Ok(OAuth2Client::new(OAuth2Config {
        provider: "oura".to_owned(),
        client_id: "client-123".to_owned(),
        client_secret: "secret-456".to_owned(),
        token_url: format!("{base}/oauth/token"),
    }))
}

#[tokio::test]
async fn test_token_endpoint_success_rotates_bundle() -> Result<()> {
    let client = token_client().await?;
    let before = Utc::now();

    let bundle = client.refresh("good-refresh").await?;

    assert_eq!(bundle.access_token, "new-access");
    assert_eq!(bundle.refresh_token, "new-refresh");
    let lifetime = (bundle.expires_at - before).num_seconds();
    assert!((21_590..=21_610).contains(&lifetime));
    Ok(())
}

#[tokio::test]
async fn test_token_endpoint_without_rotation_keeps_refresh_token() -> Result<()> {
    let client = token_client().await?;

    let bundle = client.refresh("keep-refresh").await?;

    assert_eq!(bundle.access_token, "kept-access");
    assert_eq!(bundle.refresh_token, "keep-refresh");
    assert!(!bundle.is_expired());
    Ok(())
}

#[tokio::test]
async fn test_token_endpoint_rejection_carries_provider_error() -> Result<()> {
    let client = token_client().await?;

    let error = client.refresh("revoked").await.expect_err("must be rejected");

    match error {
        ProviderError::AuthFailed {
            provider,
            code,
            description,
        } => {
            assert_eq!(provider, "oura");
            assert_eq!(code, "invalid_grant");
            assert_eq!(description, "The refresh token is invalid or expired");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_token_endpoint_field_errors_are_parsed() -> Result<()> {
    let client = token_client().await?;

    let error = client
        .refresh("strava-style")
        .await
        .expect_err("must be rejected");

    assert!(matches!(
        &error,
        ProviderError::AuthFailed { code, description, .. }
            if code == "invalid" && description == "Bad Request"
    ));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_token_endpoint_is_auth_failure() -> Result<()> {
    let client = OAuth2Client::new(OAuth2Config {
        provider: "strava".to_owned(),
        client_id: "client-123".to_owned(),
        client_secret: "secret-456".to_owned(),
        token_url: "http://127.0.0.1:9/oauth/token".to_owned(),
    });

    let error = client.refresh("good-refresh").await.expect_err("no listener");

    assert!(matches!(
        &error,
        ProviderError::AuthFailed { code, .. } if code == "request_failed"
    ));
    Ok(())
}

#[tokio::test]
async fn test_manager_over_http_client() -> Result<()> {
    let manager = CredentialManager::new(token_client().await?);
    assert_eq!(manager.provider(), "oura");

    let token = manager
        .ensure_valid(&expired_bundle("stale", "good-refresh"))
        .await?;

    assert_eq!(token, "new-access");
    Ok(())
}
