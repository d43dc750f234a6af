// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Merging a freshly fetched batch into the persisted activity history.

use crate::models::{NormalizedActivity, SyncStore};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Result of a merge.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub store: SyncStore,
    /// How many activities from the batch were actually inserted
    pub new_count: usize,
}

/// Merge `batch` into `existing`.
///
/// An activity ID is inserted at most once: records already in the store are
/// never overwritten, even if Strava has since changed them. New records go
/// ahead of the old ones and the whole list is then stably sorted by date,
/// newest first, so a same-day tie keeps the newly fetched activity on top.
pub fn merge(
    existing: SyncStore,
    batch: Vec<NormalizedActivity>,
    now: DateTime<Utc>,
) -> MergeOutcome {
    let mut seen: HashSet<String> = existing
        .activities
        .iter()
        .map(|a| a.activity_id.clone())
        .collect();

    let mut activities: Vec<NormalizedActivity> = batch
        .into_iter()
        .filter(|a| seen.insert(a.activity_id.clone()))
        .collect();
    let new_count = activities.len();

    activities.extend(existing.activities);
    activities.sort_by(|a, b| b.date.cmp(&a.date));

    MergeOutcome {
        store: SyncStore {
            total_activities: activities.len(),
            activities,
            last_sync: Some(now),
        },
        new_count,
    }
}
