// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversion of Strava summary activities into the stored shape.

use crate::models::NormalizedActivity;
use crate::services::strava::StravaActivity;

const METERS_PER_MILE: f64 = 1609.34;
const FEET_PER_METER: f64 = 3.28084;

/// Strava `workout_type` value marking a race.
const RACE_WORKOUT_TYPE: u32 = 1;

/// Sport types that all count as a plain "Run".
const RUN_SPORT_TYPES: &[&str] = &["Run", "TrailRun", "VirtualRun"];

/// Map a raw Strava activity to a [`NormalizedActivity`].
pub fn normalize(raw: &StravaActivity) -> NormalizedActivity {
    let distance = meters_to_miles(raw.distance);

    NormalizedActivity {
        activity_id: raw.id.to_string(),
        date: raw.start_date_local.naive_local().date(),
        title: raw.name.clone(),
        sport: sport_category(raw),
        distance,
        time: format_duration(raw.elapsed_time),
        pace: format_pace(raw.moving_time, distance),
        elevation: (raw.total_elevation_gain * FEET_PER_METER).round() as i64,
        avg_heart_rate: raw.average_heartrate.map(|hr| hr.round() as u32),
        max_heart_rate: raw.max_heartrate.map(|hr| hr.round() as u32),
        effort: raw.suffer_score,
        is_race: raw.workout_type == Some(RACE_WORKOUT_TYPE),
    }
}

/// Meters to miles, rounded to 2 decimal places.
pub fn meters_to_miles(meters: f64) -> f64 {
    (meters / METERS_PER_MILE * 100.0).round() / 100.0
}

/// `H:MM:SS` for an hour or more, otherwise `M:SS`.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Minutes per mile as `M:SS`. Zero distance renders `0:00`.
///
/// Seconds that round up to 60 carry into the minutes, so 7.999 min/mi
/// renders `8:00` rather than `7:60`.
pub fn format_pace(moving_seconds: u64, miles: f64) -> String {
    if miles <= 0.0 {
        return "0:00".to_string();
    }

    let pace = moving_seconds as f64 / 60.0 / miles;
    let mut minutes = pace.trunc() as u64;
    let mut seconds = ((pace - pace.trunc()) * 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }

    format!("{}:{:02}", minutes, seconds)
}

fn sport_category(raw: &StravaActivity) -> String {
    let sport = raw
        .sport_type
        .as_deref()
        .or(raw.activity_type.as_deref())
        .unwrap_or("Workout");

    if RUN_SPORT_TYPES.contains(&sport) {
        "Run".to_string()
    } else {
        sport.to_string()
    }
}
