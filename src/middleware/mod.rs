// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (sync key authentication, security headers).

pub mod security;
pub mod sync_auth;

pub use sync_auth::require_sync_key;
