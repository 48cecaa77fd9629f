// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity token issuance.

use crate::auth::{issue_token, REMEMBER_TTL_SECS, SESSION_TTL_SECS};
use crate::error::Result;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/jwt", post(issue))
}

/// Sign-in payload. `remember` opts into the long-lived session policy.
#[derive(Deserialize)]
pub struct TokenRequest {
    pub email: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a signed identity token.
///
/// The payload is caller-supplied and embedded as-is; possession of a token
/// asserts identity, nothing more. Privileges are checked per request
/// against the role directory.
async fn issue(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    let ttl = if req.remember {
        REMEMBER_TTL_SECS
    } else {
        SESSION_TTL_SECS
    };

    let token = issue_token(&req.email, ttl, &state.config.access_token_secret)?;

    Ok(Json(TokenResponse { token }))
}
