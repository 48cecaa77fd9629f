// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Bistro: backend API for the restaurant ordering application.
//!
//! This crate serves the user, menu, review, cart and payment collections
//! over HTTP, with JWT-gated access control and admin-only management routes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::StripeClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub stripe: StripeClient,
}
