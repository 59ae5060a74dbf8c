//! Tenant domain repository for database operations.

use domain::models::TenantDomain;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::domain::TenantDomainEntity;

const DOMAIN_COLUMNS: &str = "id, hostname, tenant_id, is_primary, created_at";

/// Repository for hostname-to-tenant routing records.
#[derive(Clone)]
pub struct TenantDomainRepository {
    pool: PgPool,
}

impl TenantDomainRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the routing record for an exact hostname match.
    ///
    /// This is the schema router's hot path; the hostname column is
    /// uniquely indexed.
    pub async fn find_by_hostname(
        &self,
        hostname: &str,
    ) -> Result<Option<TenantDomain>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM tenant_domains WHERE hostname = $1",
            DOMAIN_COLUMNS
        );
        let entity = sqlx::query_as::<_, TenantDomainEntity>(&sql)
            .bind(hostname)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Check if a hostname is already mapped.
    pub async fn hostname_exists(&self, hostname: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tenant_domains WHERE hostname = $1)",
        )
        .bind(hostname)
        .fetch_one(&self.pool)
        .await
    }

    /// Attach an additional hostname to a tenant.
    pub async fn create(
        &self,
        tenant_id: Uuid,
        hostname: &str,
        is_primary: bool,
    ) -> Result<TenantDomain, sqlx::Error> {
        let sql = format!(
            "INSERT INTO tenant_domains (hostname, tenant_id, is_primary) \
             VALUES ($1, $2, $3) RETURNING {}",
            DOMAIN_COLUMNS
        );
        let entity = sqlx::query_as::<_, TenantDomainEntity>(&sql)
            .bind(hostname)
            .bind(tenant_id)
            .bind(is_primary)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// The canonical hostname for a tenant.
    pub async fn find_primary_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<TenantDomain>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM tenant_domains WHERE tenant_id = $1 AND is_primary = true",
            DOMAIN_COLUMNS
        );
        let entity = sqlx::query_as::<_, TenantDomainEntity>(&sql)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// All hostnames mapped to a tenant, primary first.
    pub async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<TenantDomain>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM tenant_domains WHERE tenant_id = $1 \
             ORDER BY is_primary DESC, hostname",
            DOMAIN_COLUMNS
        );
        let entities = sqlx::query_as::<_, TenantDomainEntity>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
