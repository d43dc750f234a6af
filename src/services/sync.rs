// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity sync pipeline.
//!
//! A sync runs these stages in order:
//! 1. Load the stored token triple
//! 2. Refresh it if it is about to expire (and store the new triple)
//! 3. Fetch every page of activities from Strava
//! 4. Normalize each activity
//! 5. Merge into the stored history and write it back
//!
//! A failure at any stage aborts the sync before the history is written.

use crate::db::SyncDb;
use crate::error::{AppError, Result};
use crate::models::{SyncOutcome, SyncStatus};
use crate::services::merge::merge;
use crate::services::normalize::normalize;
use crate::services::strava::StravaClient;
use crate::services::token::TokenManager;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Stage of a sync run, attached to failure logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    TokenCheck,
    Refreshing,
    Fetching,
    Normalizing,
    Merging,
    Persisted,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStage::TokenCheck => "token_check",
            SyncStage::Refreshing => "refreshing",
            SyncStage::Fetching => "fetching",
            SyncStage::Normalizing => "normalizing",
            SyncStage::Merging => "merging",
            SyncStage::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// Result of handling the OAuth callback.
#[derive(Debug, Clone)]
pub struct OAuthResult {
    pub athlete_id: u64,
    pub firstname: String,
    pub lastname: String,
}

/// High-level service owning the token lifecycle and the sync pipeline.
///
/// Every operation that writes the token triple or the sync store holds
/// `write_lock`, so within one process there is a single writer and a
/// rotated refresh token is never raced.
#[derive(Clone)]
pub struct SyncService {
    client: StravaClient,
    tokens: TokenManager,
    db: SyncDb,
    write_lock: Arc<Mutex<()>>,
}

impl SyncService {
    pub fn new(client: StravaClient, db: SyncDb) -> Self {
        Self {
            tokens: TokenManager::new(client.clone()),
            client,
            db,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn client(&self) -> &StravaClient {
        &self.client
    }

    /// Connection state and sync summary. Reads only.
    pub async fn status(&self) -> Result<SyncStatus> {
        let is_connected = self.db.get_tokens().await?.is_some();
        let store = self.db.get_sync_store().await?;

        Ok(SyncStatus {
            is_connected,
            last_sync: store.last_sync,
            total_activities: store.total_activities,
        })
    }

    /// Run a full sync, optionally limited to activities started after `after`.
    pub async fn sync(&self, after: Option<DateTime<Utc>>) -> Result<SyncOutcome> {
        let _guard = self.write_lock.lock().await;

        let mut stage = SyncStage::TokenCheck;
        match self.run_sync(after, &mut stage).await {
            Ok(outcome) => {
                tracing::info!(
                    new_activities = outcome.new_activity_count,
                    total = outcome.total_activities,
                    last_sync = %format_utc_rfc3339(outcome.last_sync),
                    stage = %SyncStage::Persisted,
                    "Sync complete"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(stage = %stage, error = %e, "Sync failed");
                Err(e)
            }
        }
    }

    async fn run_sync(
        &self,
        after: Option<DateTime<Utc>>,
        stage: &mut SyncStage,
    ) -> Result<SyncOutcome> {
        let stored = self.db.get_tokens().await?.ok_or(AppError::NotAuthenticated)?;

        if stored.needs_refresh(Utc::now()) {
            *stage = SyncStage::Refreshing;
        }
        let tokens = self.tokens.ensure_valid(&stored).await?;

        // Strava rotates refresh tokens, so the new triple is stored right
        // away; the old refresh token may already be dead. Strava can also
        // hand back the same access token with a later expiry.
        if tokens != stored {
            self.db.set_tokens(&tokens).await?;
        }

        *stage = SyncStage::Fetching;
        let after_ts = after.map(|dt| dt.timestamp());
        tracing::info!(after = ?after_ts, "Fetching activities from Strava");
        let raw = self
            .client
            .fetch_all_activities(&tokens.access_token, after_ts)
            .await?;

        *stage = SyncStage::Normalizing;
        let batch: Vec<_> = raw.iter().map(normalize).collect();

        *stage = SyncStage::Merging;
        let existing = self.db.get_sync_store().await?;
        let outcome = merge(existing, batch, Utc::now());
        self.db.set_sync_store(&outcome.store).await?;

        let last_sync = outcome
            .store
            .last_sync
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Merge did not set lastSync")))?;

        Ok(SyncOutcome {
            new_activity_count: outcome.new_count,
            total_activities: outcome.store.total_activities,
            last_sync,
        })
    }

    // ─── OAuth ───────────────────────────────────────────────────

    /// Exchange the consent code and store the first token triple.
    ///
    /// Refused with `AlreadyConnected` while a triple is stored, so a second
    /// consent can never replace the owner's account. Disconnect first.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<OAuthResult> {
        let _guard = self.write_lock.lock().await;

        if self.db.get_tokens().await?.is_some() {
            tracing::warn!("OAuth callback while already connected, refusing code exchange");
            return Err(AppError::AlreadyConnected);
        }

        let response = self.client.exchange_code(code).await?;
        self.db.set_tokens(&response.tokens()).await?;

        tracing::info!(
            athlete_id = response.athlete.id,
            firstname = %response.athlete.firstname,
            "OAuth callback handled, tokens stored"
        );

        Ok(OAuthResult {
            athlete_id: response.athlete.id,
            firstname: response.athlete.firstname,
            lastname: response.athlete.lastname,
        })
    }

    /// Revoke the app with Strava (best effort) and drop the stored tokens.
    ///
    /// The activity history is kept. Returns false if nothing was connected.
    pub async fn disconnect(&self) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let Some(tokens) = self.db.get_tokens().await? else {
            return Ok(false);
        };

        if let Err(e) = self.client.deauthorize(&tokens.access_token).await {
            tracing::warn!(error = %e, "Failed to deauthorize with Strava, dropping tokens anyway");
        }

        self.db.delete_tokens().await?;
        tracing::info!("Strava disconnected");
        Ok(true)
    }
}
