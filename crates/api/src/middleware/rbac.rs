//! Per-tenant role checks.
//!
//! Runs after `require_user_auth` and `require_tenant`: the user must hold
//! an active role in the resolved tenant. Reads are open to every role,
//! mutating methods require an editing role.

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::tenant::ResolvedTenant;
use crate::middleware::user_auth::UserAuth;
use persistence::repositories::UserTenantRoleRepository;

/// Middleware enforcing tenant membership and write permissions.
pub async fn require_tenant_role(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth) = req.extensions().get::<UserAuth>().cloned() else {
        return ApiError::Unauthorized("Authentication required".into()).into_response();
    };
    let Some(resolved) = req.extensions().get::<ResolvedTenant>().cloned() else {
        return ApiError::NotFound("No tenant is configured for this host".into()).into_response();
    };

    let roles = UserTenantRoleRepository::new(state.pool.clone());
    let membership = match roles.find(auth.user_id, resolved.tenant.id).await {
        Ok(membership) => membership,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let Some(membership) = membership.filter(|m| m.is_active) else {
        return ApiError::Forbidden("No role in this tenant".into()).into_response();
    };

    let is_read = matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS);
    if !is_read && !membership.role.can_edit() {
        return ApiError::Forbidden("Role does not permit changes".into()).into_response();
    }

    next.run(req).await
}
