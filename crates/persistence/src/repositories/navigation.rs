//! Navigation repository for database operations (tenant-scoped).

use domain::models::navigation::{
    CreateNavigationItemRequest, NavigationItem, UpdateNavigationItemRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::entities::navigation::NavigationItemEntity;

const NAVIGATION_COLUMNS: &str = r#"id, website_id, label, url, page_id, parent_id, "order",
     is_active, opens_in_new_tab, created_at"#;

/// Repository for website navigation trees.
#[derive(Clone)]
pub struct NavigationRepository {
    pool: PgPool,
}

impl NavigationRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a navigation item under a website.
    pub async fn create(
        &self,
        ctx: &TenantContext,
        website_id: Uuid,
        request: &CreateNavigationItemRequest,
    ) -> Result<NavigationItem, sqlx::Error> {
        let sql = format!(
            r#"INSERT INTO {schema}.navigation_items
             (website_id, label, url, page_id, parent_id, "order", opens_in_new_tab)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {columns}"#,
            schema = ctx.schema(),
            columns = NAVIGATION_COLUMNS
        );
        let entity = sqlx::query_as::<_, NavigationItemEntity>(&sql)
            .bind(website_id)
            .bind(&request.label)
            .bind(&request.url)
            .bind(request.page_id)
            .bind(request.parent_id)
            .bind(request.order.unwrap_or(0))
            .bind(request.opens_in_new_tab)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// Find navigation item by ID.
    pub async fn find_by_id(
        &self,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Option<NavigationItem>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.navigation_items WHERE id = $1",
            NAVIGATION_COLUMNS,
            ctx.schema()
        );
        let entity = sqlx::query_as::<_, NavigationItemEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// All items of a website's navigation in display order.
    pub async fn list_for_website(
        &self,
        ctx: &TenantContext,
        website_id: Uuid,
    ) -> Result<Vec<NavigationItem>, sqlx::Error> {
        let sql = format!(
            r#"SELECT {} FROM {}.navigation_items WHERE website_id = $1 ORDER BY "order", label"#,
            NAVIGATION_COLUMNS,
            ctx.schema()
        );
        let entities = sqlx::query_as::<_, NavigationItemEntity>(&sql)
            .bind(website_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Update a navigation item. Absent fields keep their values.
    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        request: &UpdateNavigationItemRequest,
    ) -> Result<Option<NavigationItem>, sqlx::Error> {
        let sql = format!(
            r#"UPDATE {schema}.navigation_items SET
                label = COALESCE($2, label),
                url = COALESCE($3, url),
                page_id = COALESCE($4, page_id),
                parent_id = COALESCE($5, parent_id),
                "order" = COALESCE($6, "order"),
                is_active = COALESCE($7, is_active),
                opens_in_new_tab = COALESCE($8, opens_in_new_tab)
             WHERE id = $1 RETURNING {columns}"#,
            schema = ctx.schema(),
            columns = NAVIGATION_COLUMNS
        );
        let entity = sqlx::query_as::<_, NavigationItemEntity>(&sql)
            .bind(id)
            .bind(request.label.as_deref())
            .bind(request.url.as_deref())
            .bind(request.page_id)
            .bind(request.parent_id)
            .bind(request.order)
            .bind(request.is_active)
            .bind(request.opens_in_new_tab)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Delete a navigation item and, through the FK cascade, its children.
    pub async fn delete(&self, ctx: &TenantContext, id: Uuid) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {}.navigation_items WHERE id = $1", ctx.schema());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
