//! Subscription repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::subscription::{Subscription, SubscriptionStatus};
use domain::models::tenant::SubscriptionPlan;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::subscription::{SubscriptionEntity, SubscriptionStatusDb};
use crate::entities::tenant::SubscriptionPlanDb;

const SUBSCRIPTION_COLUMNS: &str =
    "id, user_id, tenant_id, plan, status, started_at, expires_at, next_billing_date, \
     last_payment_date";

/// Repository for per-user tenant subscriptions.
#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a subscription.
    pub async fn create(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        plan: SubscriptionPlan,
        expires_at: DateTime<Utc>,
    ) -> Result<Subscription, sqlx::Error> {
        let sql = format!(
            "INSERT INTO subscriptions (user_id, tenant_id, plan, status, expires_at, next_billing_date) \
             VALUES ($1, $2, $3, 'active', $4, $4) RETURNING {}",
            SUBSCRIPTION_COLUMNS
        );
        let entity = sqlx::query_as::<_, SubscriptionEntity>(&sql)
            .bind(user_id)
            .bind(tenant_id)
            .bind(SubscriptionPlanDb::from(plan))
            .bind(expires_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// The newest subscription of a user within a tenant.
    pub async fn find_latest(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM subscriptions \
             WHERE user_id = $1 AND tenant_id = $2 ORDER BY started_at DESC LIMIT 1",
            SUBSCRIPTION_COLUMNS
        );
        let entity = sqlx::query_as::<_, SubscriptionEntity>(&sql)
            .bind(user_id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// All subscriptions of a user across tenants.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Subscription>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE user_id = $1 ORDER BY started_at DESC",
            SUBSCRIPTION_COLUMNS
        );
        let entities = sqlx::query_as::<_, SubscriptionEntity>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Move a subscription to a new status.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE subscriptions SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(SubscriptionStatusDb::from(status))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
