//! User model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authorization role stored on a user record.
///
/// Only one role exists; everyone else is an ordinary user. The transition
/// is one-way in practice: roles are granted, never revoked, by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

/// User profile stored in Firestore, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Public identifier (role elevation addresses users by this)
    pub id: Uuid,
    /// Email address, the unique lookup key
    pub email: String,
    /// Display name
    pub name: Option<String>,
    /// Authorization role; absent until elevated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// When the user first signed in (RFC 3339)
    pub created_at: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}
