// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth consent routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// How long a consent round trip may take before its state is rejected.
const STATE_MAX_AGE_MILLIS: u128 = 15 * 60 * 1000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/strava", get(auth_start))
        .route("/auth/strava/callback", get(auth_callback))
}

/// Query parameters for starting OAuth flow.
#[derive(Deserialize)]
pub struct AuthStartParams {
    /// Frontend URL to redirect back to after OAuth completes.
    /// If not provided, uses FRONTEND_URL env var.
    #[serde(default)]
    redirect_uri: Option<String>,
}

/// Start OAuth flow - redirect to Strava authorization.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
    headers: axum::http::HeaderMap,
) -> Result<Redirect> {
    let frontend_url = params
        .redirect_uri
        .unwrap_or_else(|| state.config.frontend_url.clone());

    let oauth_state = sign_state(&frontend_url, now_millis()?, &state.config.oauth_state_key)?;
    let callback_url = format!("{}/auth/strava/callback", service_base_url(&headers));

    let auth_url = state
        .sync_service
        .client()
        .authorize_url(&callback_url, &oauth_state);

    tracing::info!(
        client_id = %state.config.strava_client_id,
        frontend_url = %frontend_url,
        "Starting OAuth flow, redirecting to Strava"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code for tokens and send the user back.
///
/// Only a state this service signed within the last fifteen minutes is
/// accepted; anything else is turned away before the code is exchanged.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect> {
    let verified = params.state.as_deref().and_then(|s| {
        verify_and_decode_state(s, &state.config.oauth_state_key, now_millis().ok()?)
    });

    let Some(frontend_url) = verified else {
        tracing::warn!("Invalid, expired or tampered state parameter, refusing callback");
        return Ok(Redirect::temporary(&error_redirect(
            &state.config.frontend_url,
            "invalid_state",
        )));
    };

    // User declined, or Strava reported a problem
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Strava");
        return Ok(Redirect::temporary(&error_redirect(&frontend_url, &error)));
    }

    let Some(code) = params.code else {
        return Err(AppError::BadRequest(
            "Missing 'code' parameter".to_string(),
        ));
    };

    tracing::info!("Exchanging authorization code for tokens");

    match state.sync_service.handle_oauth_callback(&code).await {
        Ok(result) => {
            tracing::info!(
                athlete_id = result.athlete_id,
                firstname = %result.firstname,
                "OAuth successful, tokens stored"
            );
            Ok(Redirect::temporary(&format!(
                "{}?strava=connected",
                frontend_url
            )))
        }
        Err(AppError::AlreadyConnected) => Ok(Redirect::temporary(&error_redirect(
            &frontend_url,
            "already_connected",
        ))),
        Err(AppError::AuthenticationFailure(detail)) => {
            tracing::warn!(detail = %detail, "Strava rejected the authorization code");
            Ok(Redirect::temporary(&error_redirect(
                &frontend_url,
                "authentication_failed",
            )))
        }
        Err(e) => Err(e),
    }
}

fn error_redirect(frontend_url: &str, error: &str) -> String {
    format!(
        "{}?strava=error&reason={}",
        frontend_url,
        urlencoding::encode(error)
    )
}

/// Scheme and host this request reached us on.
fn service_base_url(headers: &axum::http::HeaderMap) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            std::env::var("API_HOST").unwrap_or_else(|_| "localhost:8080".to_string())
        });

    let scheme = if host.contains("localhost") || host.contains("127.0.0.1") {
        "http"
    } else {
        "https"
    };

    format!("{}://{}", scheme, host)
}

fn now_millis() -> Result<u128> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis())
}

/// Build the signed state: base64url("frontend_url|timestamp_hex|signature_hex").
fn sign_state(frontend_url: &str, timestamp_millis: u128, secret: &[u8]) -> Result<String> {
    let state_payload = format!("{}|{:x}", frontend_url, timestamp_millis);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(state_payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    let signed_state = format!("{}|{}", state_payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed_state.as_bytes()))
}

/// Verify HMAC signature and age, then decode the frontend URL.
fn verify_and_decode_state(state: &str, secret: &[u8], now_millis: u128) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // The URL itself may contain '|', so split from the right
    let mut parts = state_str.rsplitn(3, '|');
    let signature_hex = parts.next()?;
    let timestamp_hex = parts.next()?;
    let frontend_url = parts.next()?;

    let payload = format!("{}|{}", frontend_url, timestamp_hex);

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());
    let signature = hex::decode(signature_hex).ok()?;

    if mac.verify_slice(&signature).is_err() {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    let issued_at = u128::from_str_radix(timestamp_hex, 16).ok()?;
    if now_millis.saturating_sub(issued_at) > STATE_MAX_AGE_MILLIS {
        return None;
    }

    Some(frontend_url.to_string())
}
