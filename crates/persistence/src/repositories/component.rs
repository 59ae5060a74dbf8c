//! Component repository for database operations (tenant-scoped).

use domain::models::component::{Component, CreateComponentRequest, UpdateComponentRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::entities::component::{ComponentEntity, ComponentTypeDb};

const COMPONENT_COLUMNS: &str = "id, website_id, name, component_type, description, \
     html_content, css_styles, javascript_code, is_global, created_at, updated_at";

/// Repository for reusable website components.
#[derive(Clone)]
pub struct ComponentRepository {
    pool: PgPool,
}

impl ComponentRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a component under a website.
    pub async fn create(
        &self,
        ctx: &TenantContext,
        website_id: Uuid,
        request: &CreateComponentRequest,
    ) -> Result<Component, sqlx::Error> {
        let sql = format!(
            "INSERT INTO {schema}.components \
             (website_id, name, component_type, description, html_content, css_styles, \
              javascript_code, is_global) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {columns}",
            schema = ctx.schema(),
            columns = COMPONENT_COLUMNS
        );
        let entity = sqlx::query_as::<_, ComponentEntity>(&sql)
            .bind(website_id)
            .bind(&request.name)
            .bind(ComponentTypeDb::from(request.component_type))
            .bind(&request.description)
            .bind(&request.html_content)
            .bind(&request.css_styles)
            .bind(&request.javascript_code)
            .bind(request.is_global)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// Find component by ID.
    pub async fn find_by_id(
        &self,
        ctx: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Component>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.components WHERE id = $1",
            COMPONENT_COLUMNS,
            ctx.schema()
        );
        let entity = sqlx::query_as::<_, ComponentEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// All components of a website, by name.
    pub async fn list_for_website(
        &self,
        ctx: &TenantContext,
        website_id: Uuid,
    ) -> Result<Vec<Component>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM {}.components WHERE website_id = $1 ORDER BY name",
            COMPONENT_COLUMNS,
            ctx.schema()
        );
        let entities = sqlx::query_as::<_, ComponentEntity>(&sql)
            .bind(website_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Update a component. Absent fields keep their values.
    pub async fn update(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        request: &UpdateComponentRequest,
    ) -> Result<Option<Component>, sqlx::Error> {
        let sql = format!(
            "UPDATE {schema}.components SET \
                name = COALESCE($2, name), \
                component_type = COALESCE($3, component_type), \
                description = COALESCE($4, description), \
                html_content = COALESCE($5, html_content), \
                css_styles = COALESCE($6, css_styles), \
                javascript_code = COALESCE($7, javascript_code), \
                is_global = COALESCE($8, is_global), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {columns}",
            schema = ctx.schema(),
            columns = COMPONENT_COLUMNS
        );
        let entity = sqlx::query_as::<_, ComponentEntity>(&sql)
            .bind(id)
            .bind(request.name.as_deref())
            .bind(request.component_type.map(ComponentTypeDb::from))
            .bind(request.description.as_deref())
            .bind(request.html_content.as_deref())
            .bind(request.css_styles.as_deref())
            .bind(request.javascript_code.as_deref())
            .bind(request.is_global)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Delete a component.
    pub async fn delete(&self, ctx: &TenantContext, id: Uuid) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {}.components WHERE id = $1", ctx.schema());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
