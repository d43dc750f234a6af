// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token lifecycle management.
//!
//! Turns a stored token triple into one that is valid for at least the
//! refresh margin. Persisting a refreshed triple is the caller's job.

use crate::error::AppError;
use crate::models::TokenTriple;
use crate::services::strava::StravaClient;
use chrono::{DateTime, Utc};

/// Refreshes access tokens that are at or near expiry.
#[derive(Clone)]
pub struct TokenManager {
    client: StravaClient,
}

impl TokenManager {
    pub fn new(client: StravaClient) -> Self {
        Self { client }
    }

    /// Return a triple whose access token is good for more than the margin.
    pub async fn ensure_valid(&self, tokens: &TokenTriple) -> Result<TokenTriple, AppError> {
        self.ensure_valid_at(tokens, Utc::now()).await
    }

    /// Same as [`ensure_valid`](Self::ensure_valid) with an explicit clock.
    pub async fn ensure_valid_at(
        &self,
        tokens: &TokenTriple,
        now: DateTime<Utc>,
    ) -> Result<TokenTriple, AppError> {
        if !tokens.needs_refresh(now) {
            return Ok(tokens.clone());
        }

        tracing::info!(
            expires_at = tokens.expires_at,
            "Access token expiring, refreshing"
        );

        let refreshed = self.client.refresh_token(&tokens.refresh_token).await?;

        tracing::info!(expires_at = refreshed.expires_at, "Token refreshed");
        Ok(refreshed)
    }
}
