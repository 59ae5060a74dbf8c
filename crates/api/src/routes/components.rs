//! Component routes (tenant-scoped).

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
use domain::models::component::{CreateComponentRequest, UpdateComponentRequest};
use persistence::repositories::{ComponentRepository, WebsiteRepository};

/// POST /api/v1/websites/:website_id/components
pub async fn create_component(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
    Json(request): Json<CreateComponentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let websites = WebsiteRepository::new(state.pool.clone());
    if websites.find_by_id(&resolved.context, website_id).await?.is_none() {
        return Err(ApiError::NotFound("Website not found".to_string()));
    }

    let components = ComponentRepository::new(state.pool.clone());
    let component = components
        .create(&resolved.context, website_id, &request)
        .await?;

    info!(
        tenant_id = %resolved.tenant.id,
        website_id = %website_id,
        component_id = %component.id,
        component_type = %component.component_type,
        "Created component"
    );

    Ok((StatusCode::CREATED, Json(component)))
}

/// GET /api/v1/websites/:website_id/components
pub async fn list_components(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let components = ComponentRepository::new(state.pool.clone());
    let items = components
        .list_for_website(&resolved.context, website_id)
        .await?;
    Ok(Json(serde_json::json!({ "data": items })))
}

/// GET /api/v1/components/:component_id
pub async fn get_component(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(component_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let components = ComponentRepository::new(state.pool.clone());

    match components.find_by_id(&resolved.context, component_id).await? {
        Some(component) => Ok(Json(component)),
        None => Err(ApiError::NotFound("Component not found".to_string())),
    }
}

/// PUT /api/v1/components/:component_id
pub async fn update_component(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(component_id): Path<Uuid>,
    Json(request): Json<UpdateComponentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let components = ComponentRepository::new(state.pool.clone());
    match components
        .update(&resolved.context, component_id, &request)
        .await?
    {
        Some(component) => Ok(Json(component)),
        None => Err(ApiError::NotFound("Component not found".to_string())),
    }
}

/// DELETE /api/v1/components/:component_id
pub async fn delete_component(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(component_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let components = ComponentRepository::new(state.pool.clone());

    if components.delete(&resolved.context, component_id).await? {
        info!(tenant_id = %resolved.tenant.id, component_id = %component_id, "Deleted component");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Component not found".to_string()))
    }
}
