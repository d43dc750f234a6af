// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Persisted activity history and the API shapes derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::NormalizedActivity;

/// The single persisted sync document.
///
/// Activities are kept newest first and `total_activities` always equals
/// `activities.len()`. A missing document reads as `SyncStore::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStore {
    #[serde(default)]
    pub activities: Vec<NormalizedActivity>,
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_activities: usize,
}

/// Connection and sync summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SyncStatus {
    pub is_connected: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_sync: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_activities: usize,
}

/// Result of a completed sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SyncOutcome {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub new_activity_count: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_activities: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub last_sync: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty_store() {
        let store: SyncStore = serde_json::from_str("{}").unwrap();
        assert_eq!(store, SyncStore::default());
    }

    #[test]
    fn test_store_json_keys_are_camel_case() {
        let json = serde_json::to_value(SyncStore::default()).unwrap();
        assert!(json.get("lastSync").is_some());
        assert_eq!(json["totalActivities"], 0);
        assert!(json["activities"].as_array().unwrap().is_empty());
    }
}
