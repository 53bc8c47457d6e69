//! End-to-end API flows over an in-memory database.
//!
//! Drives the real router: auth extractors, role gating, envelope codes
//! and the unlock/workflow engines all exercised through HTTP.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use market_server::core::ServerState;
use market_server::core::server::build_router;

async fn test_app() -> (Router, ServerState) {
    let state = ServerState::initialize_in_memory().await.unwrap();
    (build_router(state.clone()), state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request("POST", uri, token, Some(body))
}

fn put(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request("PUT", uri, token, Some(body))
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, None)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

/// Register an account and return (token, user_id).
async fn register(app: &Router, name: &str, phone: &str) -> (String, i64) {
    let (status, body) = send(
        app,
        post(
            "/api/auth/register",
            None,
            json!({"name": name, "phone": phone, "email": null, "password": "correct-horse"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    let data = &body["data"];
    (
        data["token"].as_str().unwrap().to_string(),
        data["user_id"].as_i64().unwrap(),
    )
}

/// Register, promote to admin directly in the ledger, and log in again so
/// the fresh token carries the admin role.
async fn register_admin(app: &Router, state: &ServerState, phone: &str) -> String {
    let (_, user_id) = register(app, "Admin", phone).await;
    sqlx::query("UPDATE user SET role = 'admin' WHERE id = ?")
        .bind(user_id)
        .execute(state.pool())
        .await
        .unwrap();
    let (status, body) = send(
        app,
        post(
            "/api/auth/login",
            None,
            json!({"phone": phone, "password": "correct-horse"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_book(app: &Router, token: &str, title: &str, price: i64) -> i64 {
    let (status, body) = send(
        app,
        post(
            "/api/books",
            Some(token),
            json!({
                "title": title,
                "author": null,
                "price": price,
                "condition": "good",
                "description": null,
                "contact_phone": "01911223344",
                "institution_id": null,
                "department_id": null
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "book create failed: {body}");
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_is_open() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, get("/api/books", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn unlock_lifecycle_over_http() {
    let (app, state) = test_app().await;

    let (buyer_token, _) = register(&app, "Buyer", "01711111111").await;
    let (seller_token, _) = register(&app, "Seller", "01722222222").await;
    let admin_token = register_admin(&app, &state, "01733333333").await;

    let book_id = create_book(&app, &seller_token, "Organic Chemistry", 650).await;

    // Contact gated before any unlock
    let (status, body) = send(
        &app,
        get(&format!("/api/books/{book_id}/contact"), Some(&buyer_token)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    // Malformed wallet number
    let (status, _) = send(
        &app,
        post(
            "/api/unlocks",
            Some(&buyer_token),
            json!({"book_id": book_id, "bkash_number": "12345"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Proper submission: 650-taka book costs 20
    let (status, body) = send(
        &app,
        post(
            "/api/unlocks",
            Some(&buyer_token),
            json!({"book_id": book_id, "bkash_number": "01711111111"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unlock failed: {body}");
    let payment_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["amount"], 20);
    assert_eq!(body["data"]["status"], "pending");

    // Second active submission is refused
    let (status, body) = send(
        &app,
        post(
            "/api/unlocks",
            Some(&buyer_token),
            json!({"book_id": book_id, "bkash_number": "01711111111"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E1002");

    // Admin sees the queue and approves
    let (status, body) = send(&app, get("/api/unlocks/pending", Some(&admin_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        put(
            &format!("/api/unlocks/{payment_id}/resolve"),
            Some(&admin_token),
            json!({"decision": "approved", "notes": "verified in bKash portal"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");

    // Double resolution is a precise conflict
    let (status, body) = send(
        &app,
        put(
            &format!("/api/unlocks/{payment_id}/resolve"),
            Some(&admin_token),
            json!({"decision": "rejected", "notes": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E1003");

    // Contact now visible
    let (status, body) = send(
        &app,
        get(&format!("/api/books/{book_id}/contact"), Some(&buyer_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["contact_phone"], "01911223344");

    // Refund: request once, repeat is pending, resolve, repeat is resolved
    let (status, _) = send(
        &app,
        put(
            &format!("/api/unlocks/{payment_id}/refund-request"),
            Some(&buyer_token),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        put(
            &format!("/api/unlocks/{payment_id}/refund-request"),
            Some(&buyer_token),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E1004");

    let (status, body) = send(
        &app,
        put(
            &format!("/api/unlocks/{payment_id}/refund-resolve"),
            Some(&admin_token),
            json!({"approved": true, "notes": "refunded"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["refund_approved"], true);

    let (status, body) = send(
        &app,
        put(
            &format!("/api/unlocks/{payment_id}/refund-resolve"),
            Some(&admin_token),
            json!({"approved": false, "notes": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E1005");

    // The payer picked up one notification per resolution
    let (status, body) = send(
        &app,
        get("/api/notifications/unread-count", Some(&buyer_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);

    let (_, body) = send(&app, get("/api/notifications", Some(&buyer_token))).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let first_id = rows[0]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        put(
            &format!("/api/notifications/{first_id}/read"),
            Some(&buyer_token),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(
        &app,
        get("/api/notifications/unread-count", Some(&buyer_token)),
    )
    .await;
    assert_eq!(body["data"]["count"], 1);
}

#[tokio::test]
async fn order_workflow_over_http() {
    let (app, state) = test_app().await;

    let (buyer_token, _) = register(&app, "Buyer", "01744444444").await;
    let (seller_token, _) = register(&app, "Seller", "01755555555").await;
    let admin_token = register_admin(&app, &state, "01766666666").await;

    let book_id = create_book(&app, &seller_token, "Higher Math", 350).await;

    let (status, body) = send(
        &app,
        post(
            "/api/orders",
            Some(&buyer_token),
            json!({
                "book_id": book_id,
                "delivery_address": "Curzon Hall, DU",
                "delivery_phone": "01744444444"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "order failed: {body}");
    let order_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "pending");

    // Owner cannot drive the workflow table
    let (status, body) = send(
        &app,
        put(
            &format!("/api/orders/{order_id}/status"),
            Some(&buyer_token),
            json!({"status": "confirmed", "notes": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    // Skipping ahead is rejected with the precise code
    let (status, body) = send(
        &app,
        put(
            &format!("/api/orders/{order_id}/status"),
            Some(&admin_token),
            json!({"status": "delivered", "notes": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E1001");

    // Idempotent retry of the current status succeeds
    let (status, body) = send(
        &app,
        put(
            &format!("/api/orders/{order_id}/status"),
            Some(&admin_token),
            json!({"status": "pending", "notes": null}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "pending");

    // Confirm notifies the owner
    let (status, body) = send(
        &app,
        put(
            &format!("/api/orders/{order_id}/status"),
            Some(&admin_token),
            json!({"status": "confirmed", "notes": "called the seller"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(body["data"]["admin_notes"], "called the seller");

    let (_, body) = send(
        &app,
        get("/api/notifications/unread-count", Some(&buyer_token)),
    )
    .await;
    assert_eq!(body["data"]["count"], 1);
}

#[tokio::test]
async fn broadcast_targets_one_institution() {
    let (app, state) = test_app().await;

    let mut tokens = Vec::new();
    for (i, phone) in ["01811111111", "01822222222", "01833333333"]
        .iter()
        .enumerate()
    {
        let (token, _) = register(&app, &format!("Student {i}"), phone).await;
        tokens.push(token);
    }
    // First two in institution 1, third in institution 2
    for (token, inst) in tokens.iter().zip([1, 1, 2]) {
        let (status, _) = send(
            &app,
            put(
                "/api/profile",
                Some(token),
                json!({"institution_id": inst, "department_id": null, "hall": null}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let admin_token = register_admin(&app, &state, "01844444444").await;

    // Non-admin callers are refused before any resolution work
    let (status, _) = send(
        &app,
        post(
            "/api/broadcast",
            Some(&tokens[0]),
            json!({
                "title": "x", "message": "y",
                "target": {"kind": "all"}
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        post(
            "/api/broadcast",
            Some(&admin_token),
            json!({
                "title": "Book fair",
                "message": "Campus book fair on Friday",
                "target": {"kind": "institution", "institution_id": 1}
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "broadcast failed: {body}");
    assert_eq!(body["data"]["sent_count"], 2);

    // Institution 1 members got it, institution 2 did not
    for (token, expected) in tokens.iter().zip([1, 1, 0]) {
        let (_, body) = send(&app, get("/api/notifications/unread-count", Some(token))).await;
        assert_eq!(body["data"]["count"], expected);
    }
}
