//! Navigation routes (tenant-scoped).

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
use domain::models::navigation::{CreateNavigationItemRequest, UpdateNavigationItemRequest};
use persistence::repositories::{NavigationRepository, WebsiteRepository};

/// POST /api/v1/websites/:website_id/navigation
pub async fn create_navigation_item(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
    Json(request): Json<CreateNavigationItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let websites = WebsiteRepository::new(state.pool.clone());
    if websites.find_by_id(&resolved.context, website_id).await?.is_none() {
        return Err(ApiError::NotFound("Website not found".to_string()));
    }

    let navigation = NavigationRepository::new(state.pool.clone());
    let item = navigation
        .create(&resolved.context, website_id, &request)
        .await?;

    info!(
        tenant_id = %resolved.tenant.id,
        website_id = %website_id,
        item_id = %item.id,
        "Created navigation item"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/websites/:website_id/navigation
pub async fn list_navigation(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let navigation = NavigationRepository::new(state.pool.clone());
    let items = navigation
        .list_for_website(&resolved.context, website_id)
        .await?;
    Ok(Json(serde_json::json!({ "data": items })))
}

/// PUT /api/v1/navigation/:item_id
pub async fn update_navigation_item(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdateNavigationItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let navigation = NavigationRepository::new(state.pool.clone());
    match navigation.update(&resolved.context, item_id, &request).await? {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::NotFound("Navigation item not found".to_string())),
    }
}

/// DELETE /api/v1/navigation/:item_id
pub async fn delete_navigation_item(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let navigation = NavigationRepository::new(state.pool.clone());

    if navigation.delete(&resolved.context, item_id).await? {
        info!(tenant_id = %resolved.tenant.id, item_id = %item_id, "Deleted navigation item");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Navigation item not found".to_string()))
    }
}
