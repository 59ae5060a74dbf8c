//! Tenant repository for database operations.

use domain::models::tenant::{ListTenantsQuery, Tenant};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::tenant::TenantEntity;

const TENANT_COLUMNS: &str = "id, schema_name, name, description, business_name, business_type, \
     contact_email, subscription_plan, subscription_expires, is_active, ai_tools_enabled, \
     custom_domain_enabled, advanced_analytics_enabled, max_pages, max_storage_mb, \
     max_monthly_ai_requests, primary_color, secondary_color, logo_url, created_at";

/// Repository for tenant directory operations.
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find tenant by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>, sqlx::Error> {
        let sql = format!("SELECT {} FROM tenants WHERE id = $1", TENANT_COLUMNS);
        let entity = sqlx::query_as::<_, TenantEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Find tenant by schema name.
    pub async fn find_by_schema_name(
        &self,
        schema_name: &str,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM tenants WHERE schema_name = $1",
            TENANT_COLUMNS
        );
        let entity = sqlx::query_as::<_, TenantEntity>(&sql)
            .bind(schema_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Check if a schema name is already taken.
    pub async fn schema_name_exists(&self, schema_name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tenants WHERE schema_name = $1)",
        )
        .bind(schema_name)
        .fetch_one(&self.pool)
        .await
    }

    /// List tenants with pagination and filtering.
    pub async fn list(&self, query: &ListTenantsQuery) -> Result<(Vec<Tenant>, i64), sqlx::Error> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 100);
        let offset = ((page - 1) * per_page) as i64;

        let mut conditions = Vec::new();

        if let Some(is_active) = query.is_active {
            conditions.push(format!("is_active = {}", is_active));
        }

        if let Some(ref plan) = query.plan {
            conditions.push(format!("subscription_plan = '{}'", plan));
        }

        if let Some(ref search) = query.search {
            let search_escaped = search.replace('\'', "''");
            conditions.push(format!(
                "(name ILIKE '%{}%' OR schema_name ILIKE '%{}%' OR business_name ILIKE '%{}%')",
                search_escaped, search_escaped, search_escaped
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM tenants {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query)
            .fetch_one(&self.pool)
            .await?;

        let list_query = format!(
            "SELECT {} FROM tenants {} ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            TENANT_COLUMNS, where_clause
        );

        let entities = sqlx::query_as::<_, TenantEntity>(&list_query)
            .bind(per_page as i64)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((entities.into_iter().map(Into::into).collect(), total))
    }

    /// Deactivate a tenant (routing keeps working for admin access, the
    /// subscription check fails).
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tenants SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
