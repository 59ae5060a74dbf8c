//! Tenant administration routes.
//!
//! Provisioning and directory management for the platform operator, plus
//! tenant switching for logged-in members. These run on the public
//! partition; the tenant being managed is named explicitly, never taken
//! from the request host.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_tenant_provisioned;
use crate::middleware::user_auth::UserAuth;
use domain::models::domain::CreateDomainRequest;
use domain::models::subscription::SubscriptionStatus;
use domain::models::tenant::{
    CreateTenantRequest, CreateTenantResponse, ListTenantsQuery, SubscriptionPlan,
    TenantUsageResponse, UsageMetric,
};
use domain::models::TenantRole;
use persistence::provisioning::{provision_tenant, ProvisionTenantParams};
use persistence::repositories::{
    ApiUsageRepository, MediaRepository, PageRepository, SubscriptionRepository,
    TenantDomainRepository, TenantRepository, UserRepository, UserTenantRoleRepository,
};
use persistence::TenantContext;
use shared::pagination::{PageInfo, PageQuery};
use shared::slug::{schema_key, slugify};

/// POST /api/v1/tenants/create
///
/// Provision a new tenant: directory rows, schema and tables.
pub async fn create_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Json(request): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let schema_name = schema_key(&request.subdomain);
    let host_label = slugify(&request.subdomain);
    if schema_name.is_empty() || host_label.is_empty() {
        return Err(ApiError::Validation(
            "subdomain: no usable characters for a subdomain".into(),
        ));
    }

    let hostname = format!("{}.{}", host_label, state.config.platform.base_domain);
    let plan = request.plan.unwrap_or(SubscriptionPlan::Starter);
    let duration_days = request.duration_days.unwrap_or(30);

    let (tenant, domain) = provision_tenant(
        &state.pool,
        ProvisionTenantParams {
            schema_name,
            name: request.name.clone(),
            description: format!("Tenant for {}", request.business_name),
            business_name: request.business_name.clone(),
            contact_email: request.contact_email.clone(),
            plan,
            subscription_expires: Some(Utc::now() + Duration::days(duration_days)),
            hostname,
        },
    )
    .await?;

    record_tenant_provisioned();
    info!(
        admin_user_id = %auth.user_id,
        tenant_id = %tenant.id,
        schema = %tenant.schema_name,
        hostname = %domain.hostname,
        plan = %tenant.subscription_plan,
        "Created new tenant"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTenantResponse {
            tenant,
            hostname: domain.hostname,
        }),
    ))
}

/// GET /api/v1/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    Query(query): Query<ListTenantsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TenantRepository::new(state.pool.clone());
    let (tenants, total) = repo.list(&query).await?;

    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };

    Ok(Json(serde_json::json!({
        "data": tenants,
        "pagination": PageInfo::new(&page_query, total),
    })))
}

/// GET /api/v1/tenants/:tenant_id
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TenantRepository::new(state.pool.clone());

    match repo.find_by_id(tenant_id).await? {
        Some(tenant) => Ok(Json(tenant)),
        None => Err(ApiError::NotFound("Tenant not found".to_string())),
    }
}

/// GET /api/v1/tenants/:tenant_id/usage
///
/// Current usage against the tenant's plan limits.
pub async fn get_tenant_usage(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tenants = TenantRepository::new(state.pool.clone());
    let Some(tenant) = tenants.find_by_id(tenant_id).await? else {
        return Err(ApiError::NotFound("Tenant not found".to_string()));
    };

    let period = Utc::now().format("%Y-%m").to_string();

    // The shared public tenant has no content schema to measure.
    let (page_count, storage_bytes) = if tenant.schema_name == "public" {
        (0, 0)
    } else {
        let ctx = TenantContext::new(tenant.id, tenant.schema_name.clone())
            .map_err(|e| ApiError::Internal(format!("Stored schema name rejected: {}", e)))?;
        let pages = PageRepository::new(state.pool.clone());
        let media = MediaRepository::new(state.pool.clone());
        (pages.count_all(&ctx).await?, media.total_file_bytes(&ctx).await?)
    };

    let usage = ApiUsageRepository::new(state.pool.clone());
    let ai_used = usage
        .find(tenant.id, &period)
        .await?
        .map(|row| i64::from(row.ai_requests_count))
        .unwrap_or(0);

    Ok(Json(TenantUsageResponse {
        tenant_id,
        pages: UsageMetric::new(page_count, tenant.max_pages),
        storage_mb: UsageMetric::new(storage_bytes / (1024 * 1024), tenant.max_storage_mb),
        ai_requests: UsageMetric::new(ai_used, tenant.max_monthly_ai_requests),
        period,
    }))
}

/// POST /api/v1/tenants/switch/:tenant_id
///
/// Switch the caller's working tenant. Verifies membership and returns
/// the hostname to continue on; actual scoping stays host-based.
pub async fn switch_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tenants = TenantRepository::new(state.pool.clone());
    let Some(tenant) = tenants.find_by_id(tenant_id).await? else {
        return Err(ApiError::NotFound("Tenant not found".to_string()));
    };

    let roles = UserTenantRoleRepository::new(state.pool.clone());
    let Some(membership) = roles.find(auth.user_id, tenant_id).await?.filter(|m| m.is_active)
    else {
        warn!(
            user_id = %auth.user_id,
            tenant_id = %tenant_id,
            "Tenant switch denied: no active role"
        );
        return Err(ApiError::Forbidden("No role in this tenant".into()));
    };

    let domains = TenantDomainRepository::new(state.pool.clone());
    let primary = domains.find_primary_for_tenant(tenant_id).await?;

    let subscriptions = SubscriptionRepository::new(state.pool.clone());
    let subscription_active = subscriptions
        .find_latest(auth.user_id, tenant_id)
        .await?
        .map(|s| s.is_active(Utc::now()))
        .unwrap_or(false);

    info!(user_id = %auth.user_id, tenant_id = %tenant_id, "Switched tenant");

    Ok(Json(serde_json::json!({
        "status": "switched",
        "tenant_id": tenant.id,
        "tenant_name": tenant.name,
        "schema_name": tenant.schema_name,
        "hostname": primary.map(|d| d.hostname),
        "role": membership.role,
        "subscription_active": subscription_active,
    })))
}

/// DELETE /api/v1/tenants/:tenant_id
///
/// Deactivate a tenant. Routing keeps answering so operators can still
/// reach it, but the subscription check fails for visitors.
pub async fn deactivate_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tenants = TenantRepository::new(state.pool.clone());

    if tenants.set_active(tenant_id, false).await? {
        info!(admin_user_id = %auth.user_id, tenant_id = %tenant_id, "Deactivated tenant");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Tenant not found".to_string()))
    }
}

/// Request to add a member to a tenant.
#[derive(Debug, serde::Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub role: TenantRole,
}

/// POST /api/v1/tenants/:tenant_id/members
///
/// Grant an existing account a role in the tenant and open a matching
/// subscription.
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(tenant_id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let tenants = TenantRepository::new(state.pool.clone());
    let Some(tenant) = tenants.find_by_id(tenant_id).await? else {
        return Err(ApiError::NotFound("Tenant not found".to_string()));
    };

    let users = UserRepository::new(state.pool.clone());
    let Some(user) = users.find_by_email(&request.email).await? else {
        return Err(ApiError::NotFound(
            "No account with this email; the user must sign up first".to_string(),
        ));
    };

    let roles = UserTenantRoleRepository::new(state.pool.clone());
    let membership = roles.assign(user.id, tenant_id, request.role).await?;

    let subscriptions = SubscriptionRepository::new(state.pool.clone());
    let expires_at = tenant
        .subscription_expires
        .unwrap_or_else(|| Utc::now() + Duration::days(30));
    let subscription = subscriptions
        .create(user.id, tenant_id, tenant.subscription_plan, expires_at)
        .await?;

    info!(
        admin_user_id = %auth.user_id,
        tenant_id = %tenant_id,
        member_user_id = %user.id,
        role = %membership.role,
        "Added tenant member"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "membership": membership,
            "subscription": subscription,
        })),
    ))
}

/// DELETE /api/v1/tenants/:tenant_id/members/:user_id
///
/// Revoke a member's role and cancel their subscription.
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path((tenant_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let roles = UserTenantRoleRepository::new(state.pool.clone());
    if !roles.revoke(user_id, tenant_id).await? {
        return Err(ApiError::NotFound("Membership not found".to_string()));
    }

    let subscriptions = SubscriptionRepository::new(state.pool.clone());
    if let Some(subscription) = subscriptions.find_latest(user_id, tenant_id).await? {
        subscriptions
            .set_status(subscription.id, SubscriptionStatus::Canceled)
            .await?;
    }

    info!(
        admin_user_id = %auth.user_id,
        tenant_id = %tenant_id,
        member_user_id = %user_id,
        "Removed tenant member"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/tenants/:tenant_id/domains
pub async fn list_domains(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let domains = TenantDomainRepository::new(state.pool.clone());
    let items = domains.list_for_tenant(tenant_id).await?;
    Ok(Json(serde_json::json!({ "data": items })))
}

/// POST /api/v1/tenants/:tenant_id/domains
///
/// Attach an extra hostname to a tenant whose plan allows custom domains.
pub async fn add_domain(
    State(state): State<AppState>,
    Extension(auth): Extension<UserAuth>,
    Path(tenant_id): Path<Uuid>,
    Json(request): Json<CreateDomainRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let tenants = TenantRepository::new(state.pool.clone());
    let Some(tenant) = tenants.find_by_id(tenant_id).await? else {
        return Err(ApiError::NotFound("Tenant not found".to_string()));
    };
    if !tenant.custom_domain_enabled {
        return Err(ApiError::Forbidden(format!(
            "Custom domains are not included in the {} plan",
            tenant.subscription_plan
        )));
    }

    if request.is_primary {
        return Err(ApiError::Validation(
            "is_primary: the provisioning-time domain stays primary; extra hostnames attach as aliases".into(),
        ));
    }

    let domains = TenantDomainRepository::new(state.pool.clone());
    if domains.hostname_exists(&request.hostname).await? {
        return Err(ApiError::Conflict(format!(
            "Domain \"{}\" already exists",
            request.hostname
        )));
    }
    let domain = domains.create(tenant_id, &request.hostname, false).await?;

    info!(
        admin_user_id = %auth.user_id,
        tenant_id = %tenant_id,
        hostname = %domain.hostname,
        "Attached tenant domain"
    );

    Ok((StatusCode::CREATED, Json(domain)))
}
