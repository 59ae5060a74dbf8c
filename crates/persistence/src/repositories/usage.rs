//! API usage repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::usage::ApiUsageEntity;

const USAGE_COLUMNS: &str =
    "id, tenant_id, period, ai_requests_count, storage_used_mb, created_at, updated_at";

/// Repository for per-tenant monthly usage counters.
#[derive(Clone)]
pub struct ApiUsageRepository {
    pool: PgPool,
}

impl ApiUsageRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The usage row for a tenant and period, if any activity was recorded.
    pub async fn find(
        &self,
        tenant_id: Uuid,
        period: &str,
    ) -> Result<Option<ApiUsageEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM api_usage WHERE tenant_id = $1 AND period = $2",
            USAGE_COLUMNS
        );
        sqlx::query_as::<_, ApiUsageEntity>(&sql)
            .bind(tenant_id)
            .bind(period)
            .fetch_optional(&self.pool)
            .await
    }

    /// Atomically consume one AI request from the tenant's monthly budget.
    ///
    /// Returns false without mutating anything when the budget is
    /// exhausted. The guard runs inside the upsert so two concurrent
    /// requests cannot both take the last slot.
    pub async fn try_consume_ai_request(
        &self,
        tenant_id: Uuid,
        period: &str,
        limit: i32,
    ) -> Result<bool, sqlx::Error> {
        if limit <= 0 {
            return Ok(false);
        }

        let consumed: Option<i32> = sqlx::query_scalar(
            "INSERT INTO api_usage (tenant_id, period, ai_requests_count) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (tenant_id, period) DO UPDATE \
                SET ai_requests_count = api_usage.ai_requests_count + 1, updated_at = NOW() \
                WHERE api_usage.ai_requests_count < $3 \
             RETURNING ai_requests_count",
        )
        .bind(tenant_id)
        .bind(period)
        .bind(limit)
        .fetch_optional(&self.pool)
        .await?;

        Ok(consumed.is_some())
    }

    /// Record the tenant's current media storage footprint.
    pub async fn record_storage(
        &self,
        tenant_id: Uuid,
        period: &str,
        storage_used_mb: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO api_usage (tenant_id, period, storage_used_mb) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (tenant_id, period) DO UPDATE \
                SET storage_used_mb = EXCLUDED.storage_used_mb, updated_at = NOW()",
        )
        .bind(tenant_id)
        .bind(period)
        .bind(storage_used_mb)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
