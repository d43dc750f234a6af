// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth credential triple.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Margin before token expiration when we proactively refresh (5 minutes).
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// The stored Strava credentials. Replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTriple {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry as returned by Strava (Unix timestamp)
    pub expires_at: i64,
}

impl TokenTriple {
    /// True once the access token is within the refresh margin of expiry (or past it).
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.saturating_sub(now.timestamp()) <= TOKEN_REFRESH_MARGIN_SECS
    }
}
