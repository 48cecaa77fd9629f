// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User collection handlers.

use crate::auth::{AdminUser, AuthUser};
use crate::error::Result;
use crate::models::{Role, User};
use crate::routes::{parse_id, UpdateResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/admin/{email}",
            get(check_admin).patch(elevate_admin),
        )
}

/// List every user record. Admin only.
async fn list_users(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>> {
    Ok(Json(state.db.list_users().await?))
}

/// Sign-up payload.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Outcome of user creation: either the stored id, or the idempotent
/// "already exists" acknowledgement.
#[derive(Serialize)]
#[serde(untagged)]
pub enum CreateUserResponse {
    Inserted {
        #[serde(rename = "insertedId")]
        inserted_id: Uuid,
    },
    Existing {
        message: String,
    },
}

/// Create a user record on first sign-in.
///
/// Creating the same email twice is not an error; the existing record is
/// left untouched.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>> {
    if state.db.get_user_by_email(&req.email).await?.is_some() {
        return Ok(Json(CreateUserResponse::Existing {
            message: "user already exist".to_string(),
        }));
    }

    let user = User {
        id: Uuid::new_v4(),
        email: req.email,
        name: req.name,
        role: None,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok(Json(CreateUserResponse::Inserted {
        inserted_id: user.id,
    }))
}

#[derive(Serialize)]
pub struct AdminStatus {
    pub admin: bool,
}

/// Report whether the queried email holds the admin role.
///
/// Callers may only ask about themselves; any other email reports `false`
/// without touching storage.
async fn check_admin(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>> {
    if user.email != email {
        return Ok(Json(AdminStatus { admin: false }));
    }

    let admin = matches!(state.db.role_of(&email).await?, Some(Role::Admin));
    Ok(Json(AdminStatus { admin }))
}

/// Grant the admin role to the user with the given identifier. Admin only.
async fn elevate_admin(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>> {
    let id = parse_id(&id)?;

    let Some(mut user) = state.db.get_user_by_id(id).await? else {
        return Ok(Json(UpdateResponse {
            matched_count: 0,
            modified_count: 0,
        }));
    };

    let modified = user.role != Some(Role::Admin);
    user.role = Some(Role::Admin);
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %id, granted_by = %admin.email, "Admin role granted");

    Ok(Json(UpdateResponse {
        matched_count: 1,
        modified_count: u64::from(modified),
    }))
}
