// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_sync::config::Config;
use activity_sync::db::SyncDb;
use activity_sync::models::TokenTriple;
use activity_sync::routes::create_router;
use activity_sync::services::StravaClient;
use activity_sync::AppState;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

/// Path of the activity listing endpoint on the mock server.
#[allow(dead_code)]
pub const ACTIVITIES_PATH: &str = "/api/v3/athlete/activities";

/// Path of the token endpoint on the mock server.
#[allow(dead_code)]
pub const TOKEN_PATH: &str = "/oauth/token";

/// Config pointing both Strava base URLs at a mock server.
#[allow(dead_code)]
pub fn test_config(server_url: &str) -> Config {
    let mut config = Config::test_default();
    config.strava_api_url = format!("{}/api/v3", server_url);
    config.strava_oauth_url = format!("{}/oauth", server_url);
    config
}

/// Strava client against a mock server.
#[allow(dead_code)]
pub fn test_client(server_url: &str) -> StravaClient {
    let config = test_config(server_url);
    StravaClient::new(
        config.strava_client_id,
        config.strava_client_secret,
        config.strava_api_url,
        config.strava_oauth_url,
    )
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(server_url: &str) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(test_config(server_url), SyncDb::memory()));
    (create_router(state.clone()), state)
}

/// Tokens comfortably outside the refresh margin.
#[allow(dead_code)]
pub fn valid_tokens() -> TokenTriple {
    TokenTriple {
        access_token: "valid_access_token".to_string(),
        refresh_token: "valid_refresh_token".to_string(),
        expires_at: (Utc::now() + Duration::hours(6)).timestamp(),
    }
}

/// Tokens that expired a minute ago.
#[allow(dead_code)]
pub fn expired_tokens() -> TokenTriple {
    TokenTriple {
        access_token: "stale_access_token".to_string(),
        refresh_token: "stale_refresh_token".to_string(),
        expires_at: (Utc::now() - Duration::minutes(1)).timestamp(),
    }
}

/// A Strava summary activity as returned by the listing endpoint.
#[allow(dead_code)]
pub fn activity_json(id: u64) -> Value {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days((id % 300) as i64);
    json!({
        "id": id,
        "name": format!("Activity {}", id),
        "type": "Run",
        "sport_type": "Run",
        "start_date": format!("{}T15:00:00Z", date),
        "start_date_local": format!("{}T07:00:00Z", date),
        "distance": 10000.0,
        "moving_time": 3000,
        "elapsed_time": 3100,
        "total_elevation_gain": 45.0,
        "average_heartrate": 150.0,
        "max_heartrate": 170.0,
        "workout_type": 0
    })
}

/// JSON body for one listing page holding `count` activities starting at `first_id`.
#[allow(dead_code)]
pub fn activities_page(first_id: u64, count: usize) -> String {
    let activities: Vec<Value> = (0..count as u64)
        .map(|i| activity_json(first_id + i))
        .collect();
    Value::Array(activities).to_string()
}

/// Token endpoint success body.
#[allow(dead_code)]
pub fn token_response(access_token: &str, refresh_token: &str, expires_at: i64) -> String {
    json!({
        "token_type": "Bearer",
        "access_token": access_token,
        "refresh_token": refresh_token,
        "expires_at": expires_at,
        "expires_in": 21600
    })
    .to_string()
}
