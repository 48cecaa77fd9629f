//! Cart item model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A menu item placed in a user's cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    /// Owner email; reads are restricted to this owner
    pub email: String,
    /// The menu item this entry references
    pub menu_item_id: Uuid,
    pub name: String,
    pub image: String,
    pub price: f64,
}
