// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cart collection handlers.

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::CartItem;
use crate::routes::{parse_id, DeleteResponse, InsertResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/carts", get(list_carts).post(create_cart_item))
        .route("/carts/{id}", delete(delete_cart_item))
}

#[derive(Deserialize)]
pub struct CartQuery {
    pub email: Option<String>,
}

/// List a cart's contents.
///
/// The claim email is authoritative: asking for any other owner's cart is
/// forbidden. A request without an email parameter gets an empty list, not
/// an error.
async fn list_carts(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartItem>>> {
    let Some(email) = query.email else {
        return Ok(Json(Vec::new()));
    };

    if email != user.email {
        return Err(AppError::NotOwner);
    }

    Ok(Json(state.db.carts_for_email(&email).await?))
}

/// Payload for adding an item to a cart.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartItemRequest {
    /// Owner email, trusted as submitted
    pub email: String,
    pub menu_item_id: Uuid,
    pub name: String,
    pub image: String,
    pub price: f64,
}

/// Add an item to a cart.
async fn create_cart_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCartItemRequest>,
) -> Result<Json<InsertResponse>> {
    let item = CartItem {
        id: Uuid::new_v4(),
        email: req.email,
        menu_item_id: req.menu_item_id,
        name: req.name,
        image: req.image,
        price: req.price,
    };
    state.db.insert_cart_item(&item).await?;

    Ok(Json(InsertResponse {
        inserted_id: item.id,
    }))
}

/// Delete a cart item by identifier. No ownership check is performed.
async fn delete_cart_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    let deleted = state.db.delete_cart_item(id).await?;

    Ok(Json(DeleteResponse {
        deleted_count: u64::from(deleted),
    }))
}
