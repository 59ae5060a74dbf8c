//! Subscription entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::entities::tenant::SubscriptionPlanDb;
use domain::models::subscription::SubscriptionStatus;

/// Database enum for subscription_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "subscription_status", rename_all = "lowercase")]
pub enum SubscriptionStatusDb {
    Active,
    Canceled,
    Expired,
    Suspended,
}

impl From<SubscriptionStatusDb> for SubscriptionStatus {
    fn from(db: SubscriptionStatusDb) -> Self {
        match db {
            SubscriptionStatusDb::Active => Self::Active,
            SubscriptionStatusDb::Canceled => Self::Canceled,
            SubscriptionStatusDb::Expired => Self::Expired,
            SubscriptionStatusDb::Suspended => Self::Suspended,
        }
    }
}

impl From<SubscriptionStatus> for SubscriptionStatusDb {
    fn from(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::Active => Self::Active,
            SubscriptionStatus::Canceled => Self::Canceled,
            SubscriptionStatus::Expired => Self::Expired,
            SubscriptionStatus::Suspended => Self::Suspended,
        }
    }
}

/// Database row mapping for the subscriptions table.
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub plan: SubscriptionPlanDb,
    pub status: SubscriptionStatusDb,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub next_billing_date: DateTime<Utc>,
    pub last_payment_date: Option<DateTime<Utc>>,
}

impl From<SubscriptionEntity> for domain::models::subscription::Subscription {
    fn from(entity: SubscriptionEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            tenant_id: entity.tenant_id,
            plan: entity.plan.into(),
            status: entity.status.into(),
            started_at: entity.started_at,
            expires_at: entity.expires_at,
            next_billing_date: entity.next_billing_date,
            last_payment_date: entity.last_payment_date,
        }
    }
}
