// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity sync: keep a local copy of a Strava activity history.
//!
//! This crate provides the backend API that connects a Strava account,
//! pages through its activities and merges them into a persisted,
//! deduplicated history for the site to render.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SyncDb;
use services::SyncService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SyncDb,
    pub sync_service: SyncService,
}

impl AppState {
    /// Wire up the Strava client and sync service over `db`.
    pub fn new(config: Config, db: SyncDb) -> Self {
        let client = services::StravaClient::new(
            config.strava_client_id.clone(),
            config.strava_client_secret.clone(),
            config.strava_api_url.clone(),
            config.strava_oauth_url.clone(),
        );
        let sync_service = SyncService::new(client, db.clone());

        Self {
            config,
            db,
            sync_service,
        }
    }
}
