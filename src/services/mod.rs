// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod merge;
pub mod normalize;
pub mod strava;
pub mod sync;
pub mod token;

pub use merge::{merge, MergeOutcome};
pub use normalize::normalize;
pub use strava::StravaClient;
pub use sync::{OAuthResult, SyncService, SyncStage};
pub use token::TokenManager;
