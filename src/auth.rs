// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT identity tokens and request guards.
//!
//! Tokens are issued at sign-in (`POST /jwt`) and verified on every
//! authenticated request. The guards are axum extractors, so each handler
//! declares the gates it requires in its signature: [`AuthUser`] verifies
//! the bearer token, [`AdminUser`] additionally checks the caller's stored
//! role. The role check can never run without a verified identity.

use crate::error::AppError;
use crate::models::Role;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Standard sign-in token lifetime (1 hour).
pub const SESSION_TTL_SECS: usize = 60 * 60;
/// Extended lifetime for returning sessions (30 days).
pub const REMEMBER_TTL_SECS: usize = 30 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Verified caller identity, decoded from the bearer token.
///
/// The email here is authoritative for ownership checks; request bodies and
/// query parameters cannot override it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

/// Caller identity that has also passed the admin role check.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub email: String,
}

/// Create a signed identity token.
///
/// The payload is caller-supplied and embedded as-is; no lookup is made to
/// confirm the email exists.
pub fn issue_token(email: &str, ttl_secs: usize, secret: &[u8]) -> anyhow::Result<String> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: email.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Verify a token and return its claims.
///
/// Fails on a bad signature, a malformed token or expiry. Never consults
/// storage.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(secret);
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
}

/// Pull the token out of an `Authorization` header value.
///
/// The token is the second whitespace-delimited segment; the scheme word
/// itself is not inspected.
fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.split_whitespace().nth(1)
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = bearer_token(header_value).ok_or(AppError::Unauthorized)?;

        let claims = verify_token(token, &state.config.access_token_secret)?;

        Ok(AuthUser { email: claims.sub })
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Authentication first; the role directory is keyed by the claim's
        // email, so there is nothing to look up without it.
        let user = AuthUser::from_request_parts(parts, state).await?;

        match state.db.role_of(&user.email).await? {
            Some(Role::Admin) => Ok(AdminUser { email: user.email }),
            _ => Err(AppError::Forbidden),
        }
    }
}
