//! Menu item model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dish on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    /// Dish description shown on the menu card
    pub recipe: String,
    /// Image URL
    pub image: String,
}
