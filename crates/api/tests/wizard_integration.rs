//! Integration tests for the signup wizard flow.
//!
//! Requires TEST_DATABASE_URL; tests skip themselves when it is unset.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::{run_migrations, test_app, try_test_pool};

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::HOST, "siteforge.test");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::HOST, "siteforge.test");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn wizard_cookie(response: &axum::response::Response) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;
    Some(pair.trim().to_string())
}

fn step1_body(email: &str) -> Value {
    json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "email": email,
        "password1": "hunter2hunter2",
        "password2": "hunter2hunter2",
    })
}

fn step2_body() -> Value {
    json!({
        "business_name": "Joe's Cafe",
        "business_category": "restaurant",
        "business_description": "Neighborhood cafe",
        "street_address": "1 Main Street",
        "city": "Springfield",
        "state": "IL",
        "zip_code": "62701",
        "country": "United States",
        "phone": "",
    })
}

#[tokio::test]
async fn test_full_wizard_walk_creates_user_and_pending_website() {
    let Some(pool) = try_test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    run_migrations(&pool).await;
    let app = test_app(pool.clone());

    let email = format!("jane+{}@example.test", Uuid::new_v4().simple());

    // Step 1 creates the session.
    let response = app
        .clone()
        .oneshot(json_request("POST", "/signup-wizard/1", None, step1_body(&email)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = wizard_cookie(&response).expect("step 1 must issue a session cookie");
    let body = body_json(response).await;
    assert_eq!(body["completed_step"], 1);
    assert_eq!(body["next_step"], 2);

    // Step 2.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/signup-wizard/2",
            Some(&cookie),
            step2_body(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Step 3 view offers deterministic candidates.
    let response = app
        .clone()
        .oneshot(get_request("/signup-wizard/3", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    let domains: Vec<String> = view["suggested_domains"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["domain"].as_str().unwrap().to_string())
        .collect();
    assert!(domains.contains(&"joescafeeats.com".to_string()));
    assert!(domains.contains(&"joescafe.com".to_string()));

    // Step 3 submit.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/signup-wizard/3",
            Some(&cookie),
            json!({"selected_domain": "joescafe.com", "custom_domain": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Step 4 finalizes.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/signup-wizard/4",
            Some(&cookie),
            json!({
                "approve_content": true,
                "design_style": "modern",
                "color_scheme": "blue",
                "additional_requests": "",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["business_name"], "Joe's Cafe");
    assert!(body["tokens"]["access_token"].as_str().unwrap().contains('.'));

    // Exactly one user and one pending record exist for this email.
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(user_count, 1);

    let pending_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pending_website_requests p \
         JOIN users u ON u.id = p.user_id WHERE u.email = $1",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(pending_count, 1);

    // The session is completed and its payload cleared.
    let (completed, data): (bool, Value) = sqlx::query_as::<_, (bool, Value)>(
        "SELECT completed_at IS NOT NULL, data FROM wizard_sessions \
         ORDER BY created_at DESC LIMIT 1",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(completed);
    assert_eq!(data, json!({}));

    // The completed session refuses further submissions.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/signup-wizard/1",
            Some(&cookie),
            step1_body(&email),
        ))
        .await
        .unwrap();
    // The cookie was cleared; a stale copy acts like a fresh session on
    // step 1, but the duplicate email is rejected either way.
    assert_ne!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_step_skipping_is_rejected() {
    let Some(pool) = try_test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    run_migrations(&pool).await;
    let app = test_app(pool);

    // No session at all.
    let response = app
        .clone()
        .oneshot(get_request("/signup-wizard/3", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_state");

    // Session at step 2 cannot submit step 4.
    let email = format!("skip+{}@example.test", Uuid::new_v4().simple());
    let response = app
        .clone()
        .oneshot(json_request("POST", "/signup-wizard/1", None, step1_body(&email)))
        .await
        .unwrap();
    let cookie = wizard_cookie(&response).unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/signup-wizard/4",
            Some(&cookie),
            json!({
                "approve_content": true,
                "design_style": "modern",
                "color_scheme": "blue",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // No user was created by any of this.
    // (The step 1 submission stored session state only.)
}

#[tokio::test]
async fn test_invalid_submission_does_not_advance() {
    let Some(pool) = try_test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    run_migrations(&pool).await;
    let app = test_app(pool.clone());

    let email = format!("invalid+{}@example.test", Uuid::new_v4().simple());

    // Mismatched passwords fail validation.
    let mut body = step1_body(&email);
    body["password2"] = json!("different_password");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/signup-wizard/1", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(user_count, 0);

    // Step 2 stays unreachable after the failed step 1.
    let response = app
        .clone()
        .oneshot(get_request("/signup-wizard/2", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
