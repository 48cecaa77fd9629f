// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Menu collection handlers.

use crate::auth::AdminUser;
use crate::error::Result;
use crate::models::MenuItem;
use crate::routes::{parse_id, DeleteResponse, InsertResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/menu", get(list_menu).post(create_menu_item))
        .route("/menu/{id}", delete(delete_menu_item))
}

/// Public menu listing.
async fn list_menu(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MenuItem>>> {
    Ok(Json(state.db.list_menu().await?))
}

#[derive(Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub recipe: String,
    pub image: String,
}

/// Add a dish to the menu. Admin only.
async fn create_menu_item(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMenuItemRequest>,
) -> Result<Json<InsertResponse>> {
    let item = MenuItem {
        id: Uuid::new_v4(),
        name: req.name,
        category: req.category,
        price: req.price,
        recipe: req.recipe,
        image: req.image,
    };
    state.db.insert_menu_item(&item).await?;

    Ok(Json(InsertResponse {
        inserted_id: item.id,
    }))
}

/// Remove a dish from the menu. Admin only.
async fn delete_menu_item(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    let deleted = state.db.delete_menu_item(id).await?;

    Ok(Json(DeleteResponse {
        deleted_count: u64::from(deleted),
    }))
}
