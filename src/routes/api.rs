// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sync API routes.

use crate::error::{AppError, Result};
use crate::middleware::require_sync_key;
use crate::models::{NormalizedActivity, SyncOutcome, SyncStatus};
use crate::time_utils::parse_after_date;
use crate::AppState;
use axum::{
    extract::{Query, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_ACTIVITY_LIMIT: usize = 50;
const MAX_ACTIVITY_LIMIT: usize = 500;

/// Public read routes plus sync-key protected write routes.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/api/strava/sync", post(sync))
        .route("/api/strava/disconnect", post(disconnect))
        .route_layer(middleware::from_fn_with_state(state, require_sync_key));

    Router::new()
        .route("/api/strava/status", get(status))
        .route("/api/activities", get(get_activities))
        .merge(protected)
}

// ─── Status ──────────────────────────────────────────────────

async fn status(State(state): State<Arc<AppState>>) -> Result<Json<SyncStatus>> {
    Ok(Json(state.sync_service.status().await?))
}

// ─── Sync ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct SyncRequest {
    /// Only fetch activities started after this date (`YYYY-MM-DD` or RFC3339).
    #[serde(default)]
    after: Option<String>,
}

/// Trigger a sync. The body is optional.
async fn sync(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SyncRequest>>,
) -> Result<Json<SyncOutcome>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let after = request
        .after
        .as_deref()
        .map(|raw| {
            parse_after_date(raw).ok_or_else(|| {
                AppError::BadRequest(
                    "Invalid 'after' parameter: must be YYYY-MM-DD or RFC3339 datetime"
                        .to_string(),
                )
            })
        })
        .transpose()?;

    tracing::info!(after = ?request.after, "Sync requested");

    Ok(Json(state.sync_service.sync(after).await?))
}

// ─── Disconnect ──────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DisconnectResponse {
    pub disconnected: bool,
}

async fn disconnect(State(state): State<Arc<AppState>>) -> Result<Json<DisconnectResponse>> {
    let disconnected = state.sync_service.disconnect().await?;
    Ok(Json(DisconnectResponse { disconnected }))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<NormalizedActivity>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_activities: usize,
}

/// Most recent stored activities, newest first.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .min(MAX_ACTIVITY_LIMIT);

    let store = state.db.get_sync_store().await?;
    let total_activities = store.total_activities;
    let activities = store.activities.into_iter().take(limit).collect();

    Ok(Json(ActivitiesResponse {
        activities,
        total_activities,
    }))
}
