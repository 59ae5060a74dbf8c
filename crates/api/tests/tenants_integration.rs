//! Integration tests for tenant provisioning and host resolution.
//!
//! Requires TEST_DATABASE_URL; tests skip themselves when it is unset.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use common::{run_migrations, test_app, try_test_pool};
use domain::models::tenant::SubscriptionPlan;
use persistence::provisioning::{provision_tenant, ProvisionTenantParams, ProvisioningError};

fn params(schema: &str, hostname: &str) -> ProvisionTenantParams {
    ProvisionTenantParams {
        schema_name: schema.to_string(),
        name: "Acme".to_string(),
        description: "Tenant for Acme Corp".to_string(),
        business_name: "Acme Corp".to_string(),
        contact_email: "ops@acme.test".to_string(),
        plan: SubscriptionPlan::Professional,
        subscription_expires: Some(Utc::now() + Duration::days(30)),
        hostname: hostname.to_string(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_provision_applies_plan_defaults_and_creates_schema() {
    let Some(pool) = try_test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    run_migrations(&pool).await;

    let suffix = Uuid::new_v4().simple().to_string();
    let schema = format!("acme_{}", &suffix[..8]);
    let hostname = format!("acme-{}.siteforge.test", &suffix[..8]);

    let (tenant, domain) = provision_tenant(&pool, params(&schema, &hostname))
        .await
        .expect("provisioning failed");

    assert_eq!(tenant.schema_name, schema);
    assert_eq!(tenant.max_pages, 50);
    assert_eq!(tenant.max_storage_mb, 5000);
    assert_eq!(tenant.max_monthly_ai_requests, 500);
    assert!(tenant.ai_tools_enabled);
    assert!(domain.is_primary);

    // The tenant's tables exist in its schema.
    let has_websites: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM information_schema.tables \
         WHERE table_schema = $1 AND table_name = 'websites')",
    )
    .bind(&schema)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(has_websites);
}

#[tokio::test]
async fn test_provision_conflicts_leave_no_rows() {
    let Some(pool) = try_test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    run_migrations(&pool).await;

    let suffix = Uuid::new_v4().simple().to_string();
    let schema = format!("dup_{}", &suffix[..8]);
    let hostname = format!("dup-{}.siteforge.test", &suffix[..8]);

    provision_tenant(&pool, params(&schema, &hostname))
        .await
        .expect("first provisioning failed");

    // Same schema key again.
    let err = provision_tenant(
        &pool,
        params(&schema, &format!("other-{}.siteforge.test", &suffix[..8])),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ProvisioningError::SchemaExists(_)));

    // Same hostname with a fresh schema key.
    let err = provision_tenant(&pool, params(&format!("fresh_{}", &suffix[..8]), &hostname))
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisioningError::DomainExists(_)));

    // Only the first tenant row exists.
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tenants WHERE schema_name LIKE $1")
            .bind(format!("%_{}", &suffix[..8]))
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_landing_resolves_tenant_host() {
    let Some(pool) = try_test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    run_migrations(&pool).await;

    let suffix = Uuid::new_v4().simple().to_string();
    let schema = format!("land_{}", &suffix[..8]);
    let hostname = format!("land-{}.siteforge.test", &suffix[..8]);
    provision_tenant(&pool, params(&schema, &hostname))
        .await
        .expect("provisioning failed");

    let app = test_app(pool);

    // Matched host renders the tenant surface.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::HOST, &hostname)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tenant"]["business_name"], "Acme Corp");

    // Unmatched host falls back to the platform landing.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::HOST, "nobody.siteforge.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["title"].as_str().unwrap().contains("Website Builder"));
}

#[tokio::test]
async fn test_tenant_scoped_route_requires_matching_host() {
    let Some(pool) = try_test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    run_migrations(&pool).await;

    let app = test_app(pool);

    // Without credentials the auth layer answers first.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/websites")
                .header(header::HOST, "nobody.siteforge.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
