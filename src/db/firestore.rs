// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles and roles, keyed by email)
//! - Menu (dishes)
//! - Reviews (read-only surface)
//! - Cart (per-owner cart items)
//! - Payments (recorded charges, read in aggregate by the stats fold)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{CartItem, MenuItem, Payment, Review, Role, User};
use uuid::Uuid;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

/// Document id for a user record. Emails are percent-encoded so the key
/// stays inside Firestore's document id charset.
fn user_doc_id(email: &str) -> String {
    urlencoding::encode(email).into_owned()
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by email, the unique lookup key.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&user_doc_id(email))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Role directory lookup.
    ///
    /// Always a fresh read; a role change takes effect on the caller's next
    /// request.
    pub async fn role_of(&self, email: &str) -> Result<Option<Role>, AppError> {
        Ok(self.get_user_by_email(email).await?.and_then(|u| u.role))
    }

    /// Find a user by public identifier.
    pub async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let id = id.to_string();
        let mut matches: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field("id").eq(id.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.pop())
    }

    /// Create or update a user.
    ///
    /// The email-derived document id is the uniqueness guarantee: two
    /// concurrent creates for the same email converge on one record.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(user_doc_id(&user.email))
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List every user record.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Menu Operations ─────────────────────────────────────────

    /// All menu items.
    pub async fn list_menu(&self) -> Result<Vec<MenuItem>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MENU)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a menu item.
    pub async fn insert_menu_item(&self, item: &MenuItem) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MENU)
            .document_id(item.id.to_string())
            .object(item)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a menu item. Returns whether a document existed.
    pub async fn delete_menu_item(&self, id: Uuid) -> Result<bool, AppError> {
        let doc_id = id.to_string();

        let existing: Option<MenuItem> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MENU)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_none() {
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::MENU)
            .document_id(&doc_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(true)
    }

    // ─── Review Operations ───────────────────────────────────────

    /// All reviews.
    pub async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::REVIEWS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Cart Operations ─────────────────────────────────────────

    /// Cart items owned by the given email.
    pub async fn carts_for_email(&self, email: &str) -> Result<Vec<CartItem>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::CART)
            .filter(|q| q.for_all([q.field("email").eq(email)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a cart item.
    pub async fn insert_cart_item(&self, item: &CartItem) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::CART)
            .document_id(item.id.to_string())
            .object(item)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a cart item. Returns whether a document existed.
    pub async fn delete_cart_item(&self, id: Uuid) -> Result<bool, AppError> {
        let doc_id = id.to_string();

        let existing: Option<CartItem> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::CART)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_none() {
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::CART)
            .document_id(&doc_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(true)
    }

    // ─── Payment Operations ──────────────────────────────────────

    /// Record a payment, keyed by the gateway charge id.
    ///
    /// Writing the same charge twice overwrites one document instead of
    /// duplicating it.
    pub async fn insert_payment(&self, payment: &Payment) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PAYMENTS)
            .document_id(&payment.transaction_id)
            .object(payment)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Every payment record. The revenue fold reads these in full.
    pub async fn list_payments(&self) -> Result<Vec<Payment>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PAYMENTS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
