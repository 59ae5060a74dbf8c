//! Media library routes (tenant-scoped, metadata only).
//!
//! File bytes live with the external storage collaborator; these routes
//! manage the folder tree and file metadata, and enforce the tenant's
//! storage limit.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::tenant::ResolvedTenant;
use domain::models::media::{CreateMediaFileRequest, CreateMediaFolderRequest};
use persistence::repositories::{ApiUsageRepository, MediaRepository};
use shared::pagination::{PageInfo, PageQuery};

const BYTES_PER_MB: i64 = 1024 * 1024;

/// POST /api/v1/media/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Json(request): Json<CreateMediaFolderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let media = MediaRepository::new(state.pool.clone());
    let folder = media.create_folder(&resolved.context, &request).await?;

    info!(tenant_id = %resolved.tenant.id, folder_id = %folder.id, "Created media folder");

    Ok((StatusCode::CREATED, Json(folder)))
}

/// GET /api/v1/media/folders
pub async fn list_folders(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
) -> Result<impl IntoResponse, ApiError> {
    let media = MediaRepository::new(state.pool.clone());
    let folders = media.list_folders(&resolved.context).await?;
    Ok(Json(serde_json::json!({ "data": folders })))
}

/// DELETE /api/v1/media/folders/:folder_id
pub async fn delete_folder(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(folder_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let media = MediaRepository::new(state.pool.clone());

    if media.delete_folder(&resolved.context, folder_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Media folder not found".to_string()))
    }
}

/// POST /api/v1/media/files
///
/// Register file metadata, enforcing the tenant's storage limit.
pub async fn create_file(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Json(request): Json<CreateMediaFileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let media = MediaRepository::new(state.pool.clone());

    let used_bytes = media.total_file_bytes(&resolved.context).await?;
    let limit_bytes = i64::from(resolved.tenant.max_storage_mb) * BYTES_PER_MB;
    if used_bytes + request.file_size > limit_bytes {
        return Err(ApiError::Conflict(format!(
            "Storage limit of {} MB reached for the {} plan",
            resolved.tenant.max_storage_mb, resolved.tenant.subscription_plan
        )));
    }

    let file = media.create_file(&resolved.context, &request).await?;

    // Keep the usage counter in step with the library's real footprint.
    let period = Utc::now().format("%Y-%m").to_string();
    let usage = ApiUsageRepository::new(state.pool.clone());
    usage
        .record_storage(
            resolved.tenant.id,
            &period,
            (used_bytes + request.file_size) as f64 / BYTES_PER_MB as f64,
        )
        .await?;

    info!(
        tenant_id = %resolved.tenant.id,
        file_id = %file.id,
        file_type = %file.file_type,
        size = file.file_size,
        "Registered media file"
    );

    Ok((StatusCode::CREATED, Json(file)))
}

/// Query parameters for listing media files.
#[derive(Debug, Deserialize, Default)]
pub struct ListFilesQuery {
    pub folder_id: Option<Uuid>,
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

/// GET /api/v1/media/files
pub async fn list_files(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Query(query): Query<ListFilesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };

    let media = MediaRepository::new(state.pool.clone());
    let (files, total) = media
        .list_files(&resolved.context, query.folder_id, &page_query)
        .await?;

    Ok(Json(serde_json::json!({
        "data": files,
        "pagination": PageInfo::new(&page_query, total),
    })))
}

/// GET /api/v1/media/files/:file_id
pub async fn get_file(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(file_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let media = MediaRepository::new(state.pool.clone());

    match media.find_file_by_id(&resolved.context, file_id).await? {
        Some(file) => Ok(Json(file)),
        None => Err(ApiError::NotFound("Media file not found".to_string())),
    }
}

/// DELETE /api/v1/media/files/:file_id
pub async fn delete_file(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Path(file_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let media = MediaRepository::new(state.pool.clone());

    if media.delete_file(&resolved.context, file_id).await? {
        info!(tenant_id = %resolved.tenant.id, file_id = %file_id, "Deleted media file");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Media file not found".to_string()))
    }
}
