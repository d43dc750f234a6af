// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod sync_store;
pub mod token;

pub use activity::NormalizedActivity;
pub use sync_store::{SyncOutcome, SyncStatus, SyncStore};
pub use token::TokenTriple;
