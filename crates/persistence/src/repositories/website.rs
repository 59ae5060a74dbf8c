//! Website repository for database operations (tenant-scoped).

use domain::models::website::{CreateWebsiteRequest, UpdateWebsiteRequest, Website};
use shared::pagination::PageQuery;
use sqlx::PgPool;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::entities::website::WebsiteEntity;

const WEBSITE_COLUMNS: &str = "id, name, description, subdomain, custom_domain, is_published, \
     primary_color, secondary_color, font_family, meta_title, meta_description, meta_keywords, \
     created_at, updated_at";

/// Repository for tenant websites.
#[derive(Clone)]
pub struct WebsiteRepository {
    pool: PgPool,
}

impl WebsiteRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a website, reserving its subdomain platform-wide.
    ///
    /// The reservation row in public.subdomain_registry and the website
    /// row in the tenant schema are written in one transaction; a
    /// duplicate subdomain anywhere on the platform aborts both.
    pub async fn create(
        &self,
        ctx: &TenantContext,
        request: &CreateWebsiteRequest,
        subdomain: &str,
    ) -> Result<Website, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO public.subdomain_registry (subdomain, tenant_id) VALUES ($1, $2)")
            .bind(subdomain)
            .bind(ctx.tenant_id())
            .execute(&mut *tx)
            .await?;

        let sql = format!(
            "INSERT INTO {schema}.websites \
             (name, description, subdomain, custom_domain, primary_color, secondary_color, \
              font_family, meta_title, meta_description, meta_keywords) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {columns}",
            schema = ctx.schema(),
            columns = WEBSITE_COLUMNS
        );
        let entity = sqlx::query_as::<_, WebsiteEntity>(&sql)
            .bind(&request.name)
            .bind(&request.description)
            .bind(subdomain)
            .bind(&request.custom_domain)
            .bind(request.primary_color.as_deref().unwrap_or("#007bff"))
            .bind(request.secondary_color.as_deref().unwrap_or("#6c757d"))
            .bind(request.font_family.as_deref().unwrap_or("Arial, sans-serif"))
            .bind(request.meta_title.as_deref().unwrap_or(""))
            .bind(request.meta_description.as_deref().unwrap_or(""))
            .bind(request.meta_keywords.as_deref().unwrap_or(""))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(entity.into())
    }

    /// Find website by ID.
    pub async fn find_by_id(
        &self,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Website>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.websites WHERE id = $1",
            WEBSITE_COLUMNS,
            ctx.schema()
        );
        let entity = sqlx::query_as::<_, WebsiteEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// List websites with pagination, newest first.
    pub async fn list(
        &self,
        ctx: &TenantContext,
        query: &PageQuery,
    ) -> Result<(Vec<Website>, i64), sqlx::Error> {
        let count_sql = format!("SELECT COUNT(*) FROM {}.websites", ctx.schema());
        let total: i64 = sqlx::query_scalar(&count_sql).fetch_one(&self.pool).await?;

        let list_sql = format!(
            "SELECT {} FROM {}.websites ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            WEBSITE_COLUMNS,
            ctx.schema()
        );
        let entities = sqlx::query_as::<_, WebsiteEntity>(&list_sql)
            .bind(query.per_page() as i64)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((entities.into_iter().map(Into::into).collect(), total))
    }

    /// Update a website. Absent fields keep their values.
    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        request: &UpdateWebsiteRequest,
    ) -> Result<Option<Website>, sqlx::Error> {
        let sql = format!(
            "UPDATE {schema}.websites SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                custom_domain = COALESCE($4, custom_domain), \
                is_published = COALESCE($5, is_published), \
                primary_color = COALESCE($6, primary_color), \
                secondary_color = COALESCE($7, secondary_color), \
                font_family = COALESCE($8, font_family), \
                meta_title = COALESCE($9, meta_title), \
                meta_description = COALESCE($10, meta_description), \
                meta_keywords = COALESCE($11, meta_keywords), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {columns}",
            schema = ctx.schema(),
            columns = WEBSITE_COLUMNS
        );
        let entity = sqlx::query_as::<_, WebsiteEntity>(&sql)
            .bind(id)
            .bind(request.name.as_deref())
            .bind(request.description.as_deref())
            .bind(request.custom_domain.as_deref())
            .bind(request.is_published)
            .bind(request.primary_color.as_deref())
            .bind(request.secondary_color.as_deref())
            .bind(request.font_family.as_deref())
            .bind(request.meta_title.as_deref())
            .bind(request.meta_description.as_deref())
            .bind(request.meta_keywords.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Delete a website and release its subdomain reservation.
    pub async fn delete(&self, ctx: &TenantContext, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let subdomain: Option<String> = {
            let sql = format!(
                "DELETE FROM {}.websites WHERE id = $1 RETURNING subdomain",
                ctx.schema()
            );
            sqlx::query_scalar(&sql)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        };

        let deleted = match subdomain {
            Some(subdomain) => {
                sqlx::query("DELETE FROM public.subdomain_registry WHERE subdomain = $1")
                    .bind(&subdomain)
                    .execute(&mut *tx)
                    .await?;
                true
            }
            None => false,
        };

        tx.commit().await?;
        Ok(deleted)
    }
}
