//! Public landing surface.
//!
//! `GET /` is the one route that resolves the host with a fallback: a
//! matched tenant host renders that tenant's site summary, anything else
//! renders the platform landing payload.

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::tenant::resolve_tenant;

/// GET /
pub async fn landing(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(resolved) = resolve_tenant(&state, &headers).await? {
        if !resolved.context.is_public() {
            let tenant = &resolved.tenant;
            return Ok(Json(json!({
                "tenant": {
                    "name": tenant.name,
                    "business_name": tenant.business_name,
                    "primary_color": tenant.primary_color,
                    "secondary_color": tenant.secondary_color,
                    "logo_url": tenant.logo_url,
                    "subscription_active": tenant.is_subscription_active(Utc::now()),
                },
            })));
        }
    }

    Ok(Json(json!({
        "title": format!("{} - Multi-Tenant Website Builder", state.config.platform.name),
        "description": "Create and manage websites with AI-powered tools",
        "features": [
            "Multi-tenant architecture",
            "AI-powered content generation",
            "Advanced media management",
            "Responsive website builder",
            "SEO optimization tools",
            "Subscription management",
        ],
    })))
}

/// GET /pricing
pub async fn pricing() -> impl IntoResponse {
    Json(json!({
        "title": "Pricing",
        "plans": [
            {
                "name": "Starter",
                "price": "$9/month",
                "features": ["10 pages", "1GB storage", "Basic support"],
            },
            {
                "name": "Professional",
                "price": "$29/month",
                "features": ["50 pages", "5GB storage", "AI tools", "Priority support"],
            },
            {
                "name": "Enterprise",
                "price": "$99/month",
                "features": ["200 pages", "20GB storage", "Advanced AI", "Custom domains"],
            },
        ],
    }))
}
