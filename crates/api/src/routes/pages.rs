//! Page routes (tenant-scoped).

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::tenant::ResolvedTenant;
use domain::models::page::{CreatePageRequest, UpdatePageRequest};
use persistence::repositories::{PageRepository, WebsiteRepository};
use shared::validation::validate_slug;

/// POST /api/v1/websites/:website_id/pages
///
/// Create a page, enforcing the tenant's plan page limit.
pub async fn create_page(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
    Json(request): Json<CreatePageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let websites = WebsiteRepository::new(state.pool.clone());
    if websites.find_by_id(&resolved.context, website_id).await?.is_none() {
        return Err(ApiError::NotFound("Website not found".to_string()));
    }

    let pages = PageRepository::new(state.pool.clone());

    let page_count = pages.count_all(&resolved.context).await?;
    if page_count >= i64::from(resolved.tenant.max_pages) {
        return Err(ApiError::Conflict(format!(
            "Page limit of {} reached for the {} plan",
            resolved.tenant.max_pages, resolved.tenant.subscription_plan
        )));
    }

    let slug = request.effective_slug();
    if validate_slug(&slug).is_err() {
        return Err(ApiError::Validation(
            "slug: title does not reduce to a usable slug".into(),
        ));
    }

    let page = pages
        .create(&resolved.context, website_id, &request, &slug)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                ApiError::Conflict(format!("A page with slug '{}' already exists", slug))
            }
            _ => ApiError::from(e),
        })?;

    info!(
        tenant_id = %resolved.tenant.id,
        website_id = %website_id,
        page_id = %page.id,
        slug = %page.slug,
        "Created page"
    );

    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /api/v1/websites/:website_id/pages
pub async fn list_pages(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pages = PageRepository::new(state.pool.clone());
    let items = pages.list_for_website(&resolved.context, website_id).await?;
    Ok(Json(serde_json::json!({ "data": items })))
}

/// GET /api/v1/websites/:website_id/pages/:slug
pub async fn get_page_by_slug(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path((website_id, slug)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let pages = PageRepository::new(state.pool.clone());

    match pages.find_by_slug(&resolved.context, website_id, &slug).await? {
        Some(page) => Ok(Json(page)),
        None => Err(ApiError::NotFound("Page not found".to_string())),
    }
}

/// GET /api/v1/pages/:page_id
pub async fn get_page(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(page_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pages = PageRepository::new(state.pool.clone());

    match pages.find_by_id(&resolved.context, page_id).await? {
        Some(page) => Ok(Json(page)),
        None => Err(ApiError::NotFound("Page not found".to_string())),
    }
}

/// PUT /api/v1/pages/:page_id
pub async fn update_page(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(page_id): Path<Uuid>,
    Json(request): Json<UpdatePageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let pages = PageRepository::new(state.pool.clone());
    match pages.update(&resolved.context, page_id, &request).await? {
        Some(page) => {
            info!(tenant_id = %resolved.tenant.id, page_id = %page_id, "Updated page");
            Ok(Json(page))
        }
        None => Err(ApiError::NotFound("Page not found".to_string())),
    }
}

/// DELETE /api/v1/pages/:page_id
pub async fn delete_page(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(page_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pages = PageRepository::new(state.pool.clone());

    if pages.delete(&resolved.context, page_id).await? {
        info!(tenant_id = %resolved.tenant.id, page_id = %page_id, "Deleted page");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Page not found".to_string()))
    }
}
