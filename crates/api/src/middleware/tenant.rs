//! Tenant resolution middleware (the schema router).
//!
//! Every tenant-scoped route runs behind `require_tenant`: the request's
//! Host header is matched exactly against the tenant_domains table and the
//! resulting `TenantContext` is inserted into request extensions. Handlers
//! receive the context as an extension value and pass it explicitly into
//! every repository call; there is no fallback partition on these routes,
//! an unmatched host is a hard 404.
//!
//! Public routes (landing, signup wizard, auth, tenant administration,
//! health) are mounted outside this middleware and operate on the shared
//! public partition.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::Tenant;
use persistence::repositories::{TenantDomainRepository, TenantRepository};
use persistence::TenantContext;

/// The tenant a request resolved to, stored in request extensions.
#[derive(Debug, Clone)]
pub struct ResolvedTenant {
    pub tenant: Tenant,
    pub context: TenantContext,
}

/// Extracts the request hostname, lowercased, without a port suffix.
pub fn request_host(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::HOST)?.to_str().ok()?;
    let host = raw.split(':').next().unwrap_or(raw).trim();
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

/// Resolves the Host header to a tenant, without judgement on a miss.
///
/// Used directly by the landing route, which falls back to the platform
/// surface for unmatched hosts.
pub async fn resolve_tenant(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<ResolvedTenant>, ApiError> {
    let Some(host) = request_host(headers) else {
        return Ok(None);
    };

    let domains = TenantDomainRepository::new(state.pool.clone());
    let Some(domain) = domains.find_by_hostname(&host).await? else {
        return Ok(None);
    };

    let tenants = TenantRepository::new(state.pool.clone());
    let Some(tenant) = tenants.find_by_id(domain.tenant_id).await? else {
        // A routing record without its tenant row means the directory is
        // inconsistent; treat as unresolvable rather than guessing.
        tracing::warn!(hostname = %host, tenant_id = %domain.tenant_id, "Dangling tenant domain");
        return Ok(None);
    };

    let context = TenantContext::new(tenant.id, tenant.schema_name.clone())
        .map_err(|e| ApiError::Internal(format!("Stored schema name rejected: {}", e)))?;

    Ok(Some(ResolvedTenant { tenant, context }))
}

/// Middleware that requires the request host to resolve to a tenant.
pub async fn require_tenant(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match resolve_tenant(&state, req.headers()).await {
        Ok(Some(resolved)) => {
            tracing::debug!(
                tenant_id = %resolved.tenant.id,
                schema = %resolved.context.schema(),
                "Resolved tenant for request"
            );
            req.extensions_mut().insert(resolved);
            next.run(req).await
        }
        Ok(None) => {
            ApiError::NotFound("No tenant is configured for this host".into()).into_response()
        }
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_host(host: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_str(host).unwrap());
        headers
    }

    #[test]
    fn test_request_host_strips_port() {
        let headers = headers_with_host("shop.siteforge.app:8080");
        assert_eq!(request_host(&headers).as_deref(), Some("shop.siteforge.app"));
    }

    #[test]
    fn test_request_host_lowercases() {
        let headers = headers_with_host("Shop.SiteForge.App");
        assert_eq!(request_host(&headers).as_deref(), Some("shop.siteforge.app"));
    }

    #[test]
    fn test_request_host_missing() {
        assert_eq!(request_host(&HeaderMap::new()), None);
    }

    #[test]
    fn test_request_host_empty() {
        let headers = headers_with_host("");
        assert_eq!(request_host(&headers), None);
    }
}
