//! Website routes (tenant-scoped).

use axum::{
    extract::{Extension, Path, Query, State},
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
use domain::models::website::{CreateWebsiteRequest, UpdateWebsiteRequest};
use persistence::repositories::WebsiteRepository;
use shared::pagination::{PageInfo, PageQuery};
use shared::validation::validate_slug;

/// POST /api/v1/websites
pub async fn create_website(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Json(request): Json<CreateWebsiteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let subdomain = request.effective_subdomain();
    if validate_slug(&subdomain).is_err() {
        return Err(ApiError::Validation(
            "subdomain: name does not reduce to a usable subdomain".into(),
        ));
    }

    let repo = WebsiteRepository::new(state.pool.clone());
    let website = repo
        .create(&resolved.context, &request, &subdomain)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                ApiError::Conflict(format!("Subdomain '{}' is already taken", subdomain))
            }
            _ => ApiError::from(e),
        })?;

    info!(
        tenant_id = %resolved.tenant.id,
        website_id = %website.id,
        subdomain = %website.subdomain,
        "Created website"
    );

    Ok((StatusCode::CREATED, Json(website)))
}

/// GET /api/v1/websites
pub async fn list_websites(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = WebsiteRepository::new(state.pool.clone());
    let (websites, total) = repo.list(&resolved.context, &query).await?;

    Ok(Json(serde_json::json!({
        "data": websites,
        "pagination": PageInfo::new(&query, total),
    })))
}

/// GET /api/v1/websites/:website_id
pub async fn get_website(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = WebsiteRepository::new(state.pool.clone());

    match repo.find_by_id(&resolved.context, website_id).await? {
        Some(website) => Ok(Json(website)),
        None => Err(ApiError::NotFound("Website not found".to_string())),
    }
}

/// PUT /api/v1/websites/:website_id
pub async fn update_website(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
    Json(request): Json<UpdateWebsiteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = WebsiteRepository::new(state.pool.clone());
    match repo.update(&resolved.context, website_id, &request).await? {
        Some(website) => {
            info!(tenant_id = %resolved.tenant.id, website_id = %website_id, "Updated website");
            Ok(Json(website))
        }
        None => Err(ApiError::NotFound("Website not found".to_string())),
    }
}

/// DELETE /api/v1/websites/:website_id
pub async fn delete_website(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(website_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = WebsiteRepository::new(state.pool.clone());

    if repo.delete(&resolved.context, website_id).await? {
        info!(tenant_id = %resolved.tenant.id, website_id = %website_id, "Deleted website");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Website not found".to_string()))
    }
}
