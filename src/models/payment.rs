// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment records and revenue aggregation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded payment, stored after a successful gateway charge.
///
/// Keyed in storage by `transaction_id`, so re-submitting the same completed
/// charge cannot create a second record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub email: String,
    pub price: f64,
    /// Gateway charge identifier (also the storage key)
    pub transaction_id: String,
    /// Cart items covered by this payment
    pub cart_ids: Vec<Uuid>,
    pub menu_item_ids: Vec<Uuid>,
    pub status: String,
    /// When the payment was recorded (RFC 3339)
    pub date: String,
}

/// Sum the `price` field over every payment.
///
/// An exact fold, not an estimate; the cost is O(payments) and the caller
/// pays it per request.
pub fn total_revenue(payments: &[Payment]) -> f64 {
    payments.iter().map(|p| p.price).sum()
}
