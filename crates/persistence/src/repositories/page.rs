//! Page repository for database operations (tenant-scoped).

use domain::models::page::{CreatePageRequest, PageType, UpdatePageRequest};
use domain::models::Page;
use sqlx::PgPool;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::entities::page::{PageEntity, PageTypeDb};

const PAGE_COLUMNS: &str = r#"id, website_id, title, slug, page_type, content, css_styles,
     javascript_code, meta_title, meta_description, is_published, is_homepage, requires_auth,
     "order", created_at, updated_at"#;

/// Repository for website pages.
#[derive(Clone)]
pub struct PageRepository {
    pool: PgPool,
}

impl PageRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a page under a website.
    pub async fn create(
        &self,
        ctx: &TenantContext,
        website_id: Uuid,
        request: &CreatePageRequest,
        slug: &str,
    ) -> Result<Page, sqlx::Error> {
        let sql = format!(
            r#"INSERT INTO {schema}.pages
             (website_id, title, slug, page_type, content, css_styles, javascript_code,
              meta_title, meta_description, is_published, is_homepage, requires_auth, "order")
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {columns}"#,
            schema = ctx.schema(),
            columns = PAGE_COLUMNS
        );
        let entity = sqlx::query_as::<_, PageEntity>(&sql)
            .bind(website_id)
            .bind(&request.title)
            .bind(slug)
            .bind(PageTypeDb::from(request.page_type.unwrap_or(PageType::Custom)))
            .bind(&request.content)
            .bind(&request.css_styles)
            .bind(&request.javascript_code)
            .bind(request.meta_title.as_deref().unwrap_or(""))
            .bind(request.meta_description.as_deref().unwrap_or(""))
            .bind(request.is_published)
            .bind(request.is_homepage)
            .bind(request.requires_auth)
            .bind(request.order.unwrap_or(0))
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// Find page by ID.
    pub async fn find_by_id(
        &self,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Page>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.pages WHERE id = $1",
            PAGE_COLUMNS,
            ctx.schema()
        );
        let entity = sqlx::query_as::<_, PageEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Find a page within a website by its slug.
    pub async fn find_by_slug(
        &self,
        ctx: &TenantContext,
        website_id: Uuid,
        slug: &str,
    ) -> Result<Option<Page>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.pages WHERE website_id = $1 AND slug = $2",
            PAGE_COLUMNS,
            ctx.schema()
        );
        let entity = sqlx::query_as::<_, PageEntity>(&sql)
            .bind(website_id)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// All pages of a website in display order.
    pub async fn list_for_website(
        &self,
        ctx: &TenantContext,
        website_id: Uuid,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let sql = format!(
            r#"SELECT {} FROM {}.pages WHERE website_id = $1 ORDER BY "order", title"#,
            PAGE_COLUMNS,
            ctx.schema()
        );
        let entities = sqlx::query_as::<_, PageEntity>(&sql)
            .bind(website_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Total page count across all of the tenant's websites, for plan
    /// limit enforcement.
    pub async fn count_all(&self, ctx: &TenantContext) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM {}.pages", ctx.schema());
        sqlx::query_scalar(&sql).fetch_one(&self.pool).await
    }

    /// Update a page. Absent fields keep their values.
    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        request: &UpdatePageRequest,
    ) -> Result<Option<Page>, sqlx::Error> {
        let sql = format!(
            r#"UPDATE {schema}.pages SET
                title = COALESCE($2, title),
                page_type = COALESCE($3, page_type),
                content = COALESCE($4, content),
                css_styles = COALESCE($5, css_styles),
                javascript_code = COALESCE($6, javascript_code),
                meta_title = COALESCE($7, meta_title),
                meta_description = COALESCE($8, meta_description),
                is_published = COALESCE($9, is_published),
                is_homepage = COALESCE($10, is_homepage),
                requires_auth = COALESCE($11, requires_auth),
                "order" = COALESCE($12, "order"),
                updated_at = NOW()
             WHERE id = $1 RETURNING {columns}"#,
            schema = ctx.schema(),
            columns = PAGE_COLUMNS
        );
        let entity = sqlx::query_as::<_, PageEntity>(&sql)
            .bind(id)
            .bind(request.title.as_deref())
            .bind(request.page_type.map(PageTypeDb::from))
            .bind(request.content.as_deref())
            .bind(request.css_styles.as_deref())
            .bind(request.javascript_code.as_deref())
            .bind(request.meta_title.as_deref())
            .bind(request.meta_description.as_deref())
            .bind(request.is_published)
            .bind(request.is_homepage)
            .bind(request.requires_auth)
            .bind(request.order)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Delete a page.
    pub async fn delete(&self, ctx: &TenantContext, id: Uuid) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {}.pages WHERE id = $1", ctx.schema());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
