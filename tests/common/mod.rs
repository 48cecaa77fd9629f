// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use bistro_server::config::Config;
use bistro_server::db::FirestoreDb;
use bistro_server::routes::create_router;
use bistro_server::services::StripeClient;
use bistro_server::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Build a test app over the given database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn app_with_db(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let stripe = StripeClient::new(config.stripe_secret_key.clone());

    let state = Arc::new(AppState { config, db, stripe });

    (create_router(state.clone()), state)
}

/// Create a test app with offline mock dependencies.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    app_with_db(test_db_offline())
}

/// Mint a session token for tests using the test signing secret.
#[allow(dead_code)]
pub fn test_token(email: &str) -> String {
    let config = Config::test_default();
    bistro_server::auth::issue_token(
        email,
        bistro_server::auth::SESSION_TTL_SECS,
        &config.access_token_secret,
    )
    .expect("Failed to create test token")
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body should be JSON")
}
