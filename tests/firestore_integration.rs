// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set). The emulator provides a clean state for
//! each test run.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use bistro_server::models::{CartItem, Payment, Role, User};
use tower::ServiceExt;
use uuid::Uuid;

mod common;
use common::{app_with_db, body_json, test_db, test_token};

/// Generate a unique email for test isolation.
fn unique_email(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}@test.example", prefix, nanos)
}

fn test_user(email: &str, role: Option<Role>) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: Some("Test User".to_string()),
        role,
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn cart_item(email: &str, price: f64) -> CartItem {
    CartItem {
        id: Uuid::new_v4(),
        email: email.to_string(),
        menu_item_id: Uuid::new_v4(),
        name: "Paella".to_string(),
        image: "https://example.com/paella.jpg".to_string(),
        price,
    }
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_creation_is_idempotent() {
    require_emulator!();

    let (app, state) = app_with_db(test_db().await);
    let email = unique_email("signup");

    let body = serde_json::json!({"email": &email, "name": "First"});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", None, body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let first = body_json(response).await;
    let first_id = first["insertedId"].as_str().unwrap().to_string();

    // Second create with the same email: acknowledged, not duplicated
    let response = app
        .oneshot(json_request("POST", "/users", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let second = body_json(response).await;
    assert_eq!(second["message"], "user already exist");

    // Exactly one stored record, still under the first id
    let stored = state.db.get_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(stored.id.to_string(), first_id);
    assert!(stored.role.is_none());
}

#[tokio::test]
async fn test_role_elevation_flow() {
    require_emulator!();

    let (app, state) = app_with_db(test_db().await);

    // Seed an admin to perform the elevation
    let admin_email = unique_email("admin");
    state
        .db
        .upsert_user(&test_user(&admin_email, Some(Role::Admin)))
        .await
        .unwrap();
    let admin_token = test_token(&admin_email);

    // And an ordinary user to elevate
    let user_email = unique_email("user");
    let user = test_user(&user_email, None);
    state.db.upsert_user(&user).await.unwrap();
    let user_token = test_token(&user_email);

    // Before elevation, the user self-check reports false
    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/users/admin/{}", user_email),
            Some(&user_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["admin"], false);

    // Elevate by identifier, as admin
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/users/admin/{}", user.id))
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["matchedCount"], 1);
    assert_eq!(body["modifiedCount"], 1);

    // The role change takes effect on the user's next request
    let response = app
        .oneshot(get_request(
            &format!("/users/admin/{}", user_email),
            Some(&user_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["admin"], true);
}

#[tokio::test]
async fn test_elevation_requires_admin_caller() {
    require_emulator!();

    let (app, state) = app_with_db(test_db().await);

    let caller_email = unique_email("plain");
    state
        .db
        .upsert_user(&test_user(&caller_email, None))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/users/admin/{}", Uuid::new_v4()))
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", test_token(&caller_email)),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["message"], "forbidden access");
}

#[tokio::test]
async fn test_admin_routes_forbidden_without_role() {
    require_emulator!();

    let (app, state) = app_with_db(test_db().await);

    let email = unique_email("nobody");
    state.db.upsert_user(&test_user(&email, None)).await.unwrap();
    let token = test_token(&email);

    for uri in ["/users", "/admin-stats"] {
        let response = app
            .clone()
            .oneshot(get_request(uri, Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "uri: {}", uri);

        let body = body_json(response).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "forbidden access");
    }

    // A token for an email with no record at all is equally forbidden
    let ghost_token = test_token(&unique_email("ghost"));
    let response = app
        .oneshot(get_request("/users", Some(&ghost_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ═══════════════════════════════════════════════════════════════════════════
// MENU TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_menu_create_and_delete_as_admin() {
    require_emulator!();

    let (app, state) = app_with_db(test_db().await);

    let admin_email = unique_email("chef");
    state
        .db
        .upsert_user(&test_user(&admin_email, Some(Role::Admin)))
        .await
        .unwrap();
    let admin_token = test_token(&admin_email);

    let dish = serde_json::json!({
        "name": "Tuna Niçoise",
        "category": "salad",
        "price": 18.5,
        "recipe": "Seared tuna with olives and egg",
        "image": "https://example.com/nicoise.jpg",
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/menu", Some(&admin_token), dish))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let inserted_id = body_json(response).await["insertedId"]
        .as_str()
        .unwrap()
        .to_string();

    // Publicly listed
    let response = app.clone().oneshot(get_request("/menu", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let menu = body_json(response).await;
    assert!(menu
        .as_array()
        .unwrap()
        .iter()
        .any(|item| item["id"] == inserted_id.as_str()));

    // Non-admin deletion is forbidden
    let diner_email = unique_email("diner");
    state
        .db
        .upsert_user(&test_user(&diner_email, None))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/menu/{}", inserted_id))
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", test_token(&diner_email)),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin deletion succeeds
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/menu/{}", inserted_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["deletedCount"], 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// CART TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_cart_listing_is_scoped_to_owner() {
    require_emulator!();

    let (app, state) = app_with_db(test_db().await);

    let owner = unique_email("owner");
    let other = unique_email("other");

    let own_item = cart_item(&owner, 12.0);
    state.db.insert_cart_item(&own_item).await.unwrap();
    state
        .db
        .insert_cart_item(&cart_item(&other, 9.0))
        .await
        .unwrap();

    // The owner sees exactly their items
    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/carts?email={}", owner),
            Some(&test_token(&owner)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let items = body_json(response).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], own_item.id.to_string());

    // Another authenticated caller may not read it
    let response = app
        .oneshot(get_request(
            &format!("/carts?email={}", owner),
            Some(&test_token(&other)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["message"], "Forbidden access");
}

// ═══════════════════════════════════════════════════════════════════════════
// PAYMENT & STATS TESTS
// ═══════════════════════════════════════════════════════════════════════════

fn payment(email: &str, price: f64, txn: &str) -> Payment {
    Payment {
        id: Uuid::new_v4(),
        email: email.to_string(),
        price,
        transaction_id: txn.to_string(),
        cart_ids: vec![],
        menu_item_ids: vec![],
        status: "succeeded".to_string(),
        date: chrono::Utc::now().to_rfc3339(),
    }
}

/// Revenue fold over the payments collection. No other test writes
/// payments, so the totals here are exact.
#[tokio::test]
async fn test_admin_stats_revenue_fold() {
    require_emulator!();

    let (app, state) = app_with_db(test_db().await);

    let admin_email = unique_email("owner-admin");
    state
        .db
        .upsert_user(&test_user(&admin_email, Some(Role::Admin)))
        .await
        .unwrap();
    let admin_token = test_token(&admin_email);

    // One payment through the route, two seeded directly
    let diner = unique_email("payer");
    let body = serde_json::json!({
        "email": &diner,
        "price": 10.0,
        "transactionId": format!("pi_{}", Uuid::new_v4().simple()),
        "status": "succeeded",
    });
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/payment",
            Some(&test_token(&diner)),
            body,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    state
        .db
        .insert_payment(&payment(&diner, 25.5, "pi_seed_a"))
        .await
        .unwrap();
    state
        .db
        .insert_payment(&payment(&diner, 4.5, "pi_seed_b"))
        .await
        .unwrap();

    let response = app
        .oneshot(get_request("/admin-stats", Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_json(response).await;
    assert_eq!(stats["revenue"], 40.0);
    assert_eq!(stats["orders"], 3);
    assert!(stats["users"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn test_payment_record_is_idempotent_per_charge() {
    require_emulator!();

    let (_, state) = app_with_db(test_db().await);

    let diner = unique_email("repeat");
    let txn = format!("pi_{}", Uuid::new_v4().simple());

    state
        .db
        .insert_payment(&payment(&diner, 33.0, &txn))
        .await
        .unwrap();
    state
        .db
        .insert_payment(&payment(&diner, 33.0, &txn))
        .await
        .unwrap();

    let matching: Vec<Payment> = state
        .db
        .list_payments()
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.transaction_id == txn)
        .collect();

    assert_eq!(matching.len(), 1, "same charge id must stay a single record");
}
