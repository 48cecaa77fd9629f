// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod auth;
pub mod carts;
pub mod menu;
pub mod payments;
pub mod reviews;
pub mod users;

use crate::error::AppError;
use crate::middleware::security::add_security_headers;
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

/// Liveness probe.
async fn root() -> &'static str {
    "Bistro boss server is running"
}

/// Acknowledgement body for create endpoints.
#[derive(Serialize)]
pub struct InsertResponse {
    #[serde(rename = "insertedId")]
    pub inserted_id: Uuid,
}

/// Acknowledgement body for delete endpoints.
#[derive(Serialize)]
pub struct DeleteResponse {
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// Acknowledgement body for update endpoints.
#[derive(Serialize)]
pub struct UpdateResponse {
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

/// Parse a path identifier, rejecting malformed values before any storage
/// access happens.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid identifier: {}", raw)))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    Router::new()
        .route("/", get(root))
        .merge(auth::routes())
        .merge(users::routes())
        .merge(menu::routes())
        .merge(reviews::routes())
        .merge(carts::routes())
        .merge(payments::routes())
        .layer(middleware::from_fn(add_security_headers))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
