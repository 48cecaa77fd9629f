// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Review handlers. Reviews are written elsewhere; this layer only reads.

use crate::error::Result;
use crate::models::Review;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/reviews", get(list_reviews))
}

async fn list_reviews(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.db.list_reviews().await?))
}
