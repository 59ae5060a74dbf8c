//! Media library repository for database operations (tenant-scoped).

use domain::models::media::{
    CreateMediaFileRequest, CreateMediaFolderRequest, MediaFile, MediaFolder,
};
use shared::pagination::PageQuery;
use sqlx::PgPool;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::entities::media::{MediaFileEntity, MediaFileTypeDb, MediaFolderEntity};

const FOLDER_COLUMNS: &str = "id, name, description, parent_id, created_at, updated_at";
const FILE_COLUMNS: &str = "id, name, description, file_type, original_filename, file_size, \
     mime_type, folder_id, alt_text, width, height, created_at, updated_at";

/// Repository for media folders and file metadata.
#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a media folder.
    pub async fn create_folder(
        &self,
        ctx: &TenantContext,
        request: &CreateMediaFolderRequest,
    ) -> Result<MediaFolder, sqlx::Error> {
        let sql = format!(
            "INSERT INTO {schema}.media_folders (name, description, parent_id) \
             VALUES ($1, $2, $3) RETURNING {columns}",
            schema = ctx.schema(),
            columns = FOLDER_COLUMNS
        );
        let entity = sqlx::query_as::<_, MediaFolderEntity>(&sql)
            .bind(&request.name)
            .bind(&request.description)
            .bind(request.parent_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// All folders, by name.
    pub async fn list_folders(&self, ctx: &TenantContext) -> Result<Vec<MediaFolder>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.media_folders ORDER BY name",
            FOLDER_COLUMNS,
            ctx.schema()
        );
        let entities = sqlx::query_as::<_, MediaFolderEntity>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Delete a folder; contained files move to the library root via the
    /// FK's SET NULL.
    pub async fn delete_folder(&self, ctx: &TenantContext, id: Uuid) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {}.media_folders WHERE id = $1", ctx.schema());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Register a media file's metadata.
    pub async fn create_file(
        &self,
        ctx: &TenantContext,
        request: &CreateMediaFileRequest,
    ) -> Result<MediaFile, sqlx::Error> {
        let sql = format!(
            "INSERT INTO {schema}.media_files \
             (name, description, file_type, original_filename, file_size, mime_type, folder_id, \
              alt_text, width, height) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {columns}",
            schema = ctx.schema(),
            columns = FILE_COLUMNS
        );
        let entity = sqlx::query_as::<_, MediaFileEntity>(&sql)
            .bind(&request.name)
            .bind(&request.description)
            .bind(MediaFileTypeDb::from(request.file_type))
            .bind(&request.original_filename)
            .bind(request.file_size)
            .bind(&request.mime_type)
            .bind(request.folder_id)
            .bind(&request.alt_text)
            .bind(request.width)
            .bind(request.height)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// Find a media file by ID.
    pub async fn find_file_by_id(
        &self,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Option<MediaFile>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.media_files WHERE id = $1",
            FILE_COLUMNS,
            ctx.schema()
        );
        let entity = sqlx::query_as::<_, MediaFileEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// List media files, newest first, optionally within one folder.
    pub async fn list_files(
        &self,
        ctx: &TenantContext,
        folder_id: Option<Uuid>,
        query: &PageQuery,
    ) -> Result<(Vec<MediaFile>, i64), sqlx::Error> {
        let folder_clause = if folder_id.is_some() {
            "WHERE folder_id = $3"
        } else {
            ""
        };

        let count_sql = format!(
            "SELECT COUNT(*) FROM {}.media_files {}",
            ctx.schema(),
            if folder_id.is_some() { "WHERE folder_id = $1" } else { "" }
        );
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(folder_id) = folder_id {
            count_query = count_query.bind(folder_id);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let list_sql = format!(
            "SELECT {} FROM {}.media_files {} ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            FILE_COLUMNS,
            ctx.schema(),
            folder_clause
        );
        let mut list_query = sqlx::query_as::<_, MediaFileEntity>(&list_sql)
            .bind(query.per_page() as i64)
            .bind(query.offset());
        if let Some(folder_id) = folder_id {
            list_query = list_query.bind(folder_id);
        }
        let entities = list_query.fetch_all(&self.pool).await?;

        Ok((entities.into_iter().map(Into::into).collect(), total))
    }

    /// Delete a media file's metadata.
    pub async fn delete_file(&self, ctx: &TenantContext, id: Uuid) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {}.media_files WHERE id = $1", ctx.schema());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total stored bytes across the tenant's media library.
    pub async fn total_file_bytes(&self, ctx: &TenantContext) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "SELECT COALESCE(SUM(file_size), 0) FROM {}.media_files",
            ctx.schema()
        );
        sqlx::query_scalar(&sql).fetch_one(&self.pool).await
    }
}
