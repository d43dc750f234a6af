// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Normalized activity model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored activity record, derived from a Strava summary activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NormalizedActivity {
    /// Strava activity ID as a string (dedup key)
    pub activity_id: String,
    /// Local calendar date of the start time
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// Activity name/title
    pub title: String,
    /// Sport category ("Run", "Ride", "Hike", ...)
    pub sport: String,
    /// Distance in miles, 2 decimal places
    pub distance: f64,
    /// Elapsed time, `H:MM:SS` or `M:SS`
    pub time: String,
    /// Pace per mile, `M:SS`
    pub pace: String,
    /// Elevation gain in feet
    pub elevation: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_heart_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Strava relative effort
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<f64>,
    pub is_race: bool,
}
