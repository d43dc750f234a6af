// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Paginated activity listing
//! - OAuth code exchange, token refresh and deauthorization
//! - Rate limit detection

use crate::error::AppError;
use crate::models::TokenTriple;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

/// Page size used when listing activities (Strava's maximum is 200).
pub const ACTIVITIES_PER_PAGE: u32 = 100;

/// Scopes requested during the consent flow.
const OAUTH_SCOPES: &str = "read,activity:read_all";

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    api_base_url: String,
    oauth_base_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a client against the given API and OAuth base URLs.
    pub fn new(
        client_id: String,
        client_secret: String,
        api_base_url: impl Into<String>,
        oauth_base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: api_base_url.into(),
            oauth_base_url: oauth_base_url.into(),
            client_id,
            client_secret,
        }
    }

    // ─── Activities ──────────────────────────────────────────────

    /// List one page of the athlete's activities.
    pub async fn list_activities(
        &self,
        access_token: &str,
        after: Option<i64>, // Unix timestamp
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StravaActivity>, AppError> {
        let url = format!("{}/athlete/activities", self.api_base_url);

        let mut query = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::RemoteFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::RemoteFetch(format!("JSON parse error: {}", e)))
    }

    /// Fetch every activity after `after`, page by page.
    ///
    /// A page shorter than [`ACTIVITIES_PER_PAGE`] ends the listing, so a
    /// history that is an exact multiple of the page size costs one extra
    /// request that comes back empty. Any failed page fails the whole fetch.
    pub async fn fetch_all_activities(
        &self,
        access_token: &str,
        after: Option<i64>,
    ) -> Result<Vec<StravaActivity>, AppError> {
        let mut activities = Vec::new();
        let mut page = 1u32;

        loop {
            let batch = self
                .list_activities(access_token, after, page, ACTIVITIES_PER_PAGE)
                .await?;
            let count = batch.len();
            activities.extend(batch);

            tracing::debug!(page, count, total = activities.len(), "Fetched activity page");

            if count < ACTIVITIES_PER_PAGE as usize {
                break;
            }
            page += 1;
        }

        tracing::info!(
            pages = page,
            total = activities.len(),
            "Finished fetching activities"
        );
        Ok(activities)
    }

    // ─── OAuth ───────────────────────────────────────────────────

    /// Build the consent page URL.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}/authorize?\
             client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             approval_prompt=auto&\
             scope={}&\
             state={}",
            self.oauth_base_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(OAUTH_SCOPES),
            urlencoding::encode(state)
        )
    }

    /// Exchange an authorization code for the first token triple.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse, AppError> {
        self.post_token(&[("code", code), ("grant_type", "authorization_code")])
            .await
    }

    /// Refresh an expiring access token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenTriple, AppError> {
        let response: TokenRefreshResponse = self
            .post_token(&[
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .await?;

        Ok(response.into())
    }

    /// Deauthorize the application for the athlete.
    ///
    /// This invalidates all access and refresh tokens for the athlete.
    pub async fn deauthorize(&self, access_token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!("{}/deauthorize", self.oauth_base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::AuthenticationFailure(format!("Deauthorization request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AuthenticationFailure(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        tracing::info!("Strava deauthorization successful");
        Ok(())
    }

    /// POST to the token endpoint with client credentials plus `params`.
    async fn post_token<T: for<'de> Deserialize<'de>>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        form.extend_from_slice(params);

        let response = self
            .http
            .post(format!("{}/token", self.oauth_base_url))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::AuthenticationFailure(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token request rejected");
            return Err(AppError::AuthenticationFailure(body));
        }

        response.json().await.map_err(|e| {
            AppError::AuthenticationFailure(format!("Failed to parse token response: {}", e))
        })
    }
}

/// Map a failed listing response to an error.
async fn fetch_error(response: reqwest::Response) -> AppError {
    let status = response.status();

    if status.as_u16() == 429 {
        tracing::warn!("Strava rate limit hit (429)");
        return AppError::RemoteFetch(AppError::STRAVA_RATE_LIMIT.to_string());
    }

    if status.as_u16() == 401 {
        return AppError::RemoteFetch(AppError::STRAVA_TOKEN_ERROR.to_string());
    }

    let body = response.text().await.unwrap_or_default();
    AppError::RemoteFetch(format!("HTTP {}: {}", status, body))
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl From<TokenRefreshResponse> for TokenTriple {
    fn from(response: TokenRefreshResponse) -> Self {
        TokenTriple {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
        }
    }
}

/// Token exchange response from Strava OAuth (includes athlete info).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub athlete: StravaAthlete,
}

impl TokenExchangeResponse {
    pub fn tokens(&self) -> TokenTriple {
        TokenTriple {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Athlete info from OAuth token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaAthlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

/// Summary activity from the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaActivity {
    pub id: u64,
    pub name: String,
    /// Fine-grained sport (e.g. "TrailRun")
    #[serde(default)]
    pub sport_type: Option<String>,
    /// Legacy coarse activity type
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    pub start_date: DateTime<Utc>,
    /// Start time in the athlete's timezone
    pub start_date_local: DateTime<FixedOffset>,
    /// Meters
    pub distance: f64,
    /// Seconds
    pub moving_time: u64,
    /// Seconds
    pub elapsed_time: u64,
    /// Meters
    #[serde(default)]
    pub total_elevation_gain: f64,
    #[serde(default)]
    pub average_heartrate: Option<f64>,
    #[serde(default)]
    pub max_heartrate: Option<f64>,
    #[serde(default)]
    pub suffer_score: Option<f64>,
    #[serde(default)]
    pub workout_type: Option<u32>,
}
