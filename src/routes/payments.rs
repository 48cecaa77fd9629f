// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment recording, gateway bridging and admin reporting.

use crate::auth::{AdminUser, AuthUser};
use crate::error::Result;
use crate::models::payment::total_revenue;
use crate::models::Payment;
use crate::routes::InsertResponse;
use crate::services::stripe::to_minor_units;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payment", post(record_payment))
        .route("/admin-stats", get(admin_stats))
}

#[derive(Deserialize)]
pub struct CreateIntentRequest {
    pub price: f64,
}

#[derive(Serialize)]
pub struct CreateIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Create a charge intent with the payment gateway.
///
/// The client secret goes back to the frontend, which confirms the charge
/// directly with the gateway.
async fn create_payment_intent(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>> {
    let amount = to_minor_units(req.price);
    let intent = state.stripe.create_payment_intent(amount).await?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Payload recording a completed charge.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub email: String,
    pub price: f64,
    /// Charge id returned by the gateway
    pub transaction_id: String,
    #[serde(default)]
    pub cart_ids: Vec<Uuid>,
    #[serde(default)]
    pub menu_item_ids: Vec<Uuid>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "pending".to_string()
}

/// Record a payment after a successful gateway charge.
///
/// The record is keyed by the charge id, so a replayed submission cannot
/// double-record. The price is stored as submitted; it is not re-validated
/// against the gateway.
async fn record_payment(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<InsertResponse>> {
    let payment = Payment {
        id: Uuid::new_v4(),
        email: req.email,
        price: req.price,
        transaction_id: req.transaction_id,
        cart_ids: req.cart_ids,
        menu_item_ids: req.menu_item_ids,
        status: req.status,
        date: chrono::Utc::now().to_rfc3339(),
    };
    state.db.insert_payment(&payment).await?;

    tracing::info!(transaction_id = %payment.transaction_id, "Payment recorded");

    Ok(Json(InsertResponse {
        inserted_id: payment.id,
    }))
}

/// Dashboard counters. Admin only.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub revenue: f64,
    pub users: usize,
    pub menu_items: usize,
    pub orders: usize,
}

/// Compute dashboard stats.
///
/// Revenue is an exact fold over every payment record, recomputed per
/// request; the collection counts ride along on the same reads.
async fn admin_stats(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AdminStats>> {
    let users = state.db.list_users().await?.len();
    let menu_items = state.db.list_menu().await?.len();
    let payments = state.db.list_payments().await?;

    Ok(Json(AdminStats {
        revenue: total_revenue(&payments),
        users,
        menu_items,
        orders: payments.len(),
    }))
}
