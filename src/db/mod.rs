//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const MENU: &str = "menu";
    pub const REVIEWS: &str = "reviews";
    pub const CART: &str = "cart";
    pub const PAYMENTS: &str = "payments";
}
