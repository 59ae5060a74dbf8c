//! Tenant entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::tenant::SubscriptionPlan;

/// Database enum for subscription_plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "subscription_plan", rename_all = "lowercase")]
pub enum SubscriptionPlanDb {
    Starter,
    Professional,
    Enterprise,
}

impl From<SubscriptionPlanDb> for SubscriptionPlan {
    fn from(db: SubscriptionPlanDb) -> Self {
        match db {
            SubscriptionPlanDb::Starter => Self::Starter,
            SubscriptionPlanDb::Professional => Self::Professional,
            SubscriptionPlanDb::Enterprise => Self::Enterprise,
        }
    }
}

impl From<SubscriptionPlan> for SubscriptionPlanDb {
    fn from(plan: SubscriptionPlan) -> Self {
        match plan {
            SubscriptionPlan::Starter => Self::Starter,
            SubscriptionPlan::Professional => Self::Professional,
            SubscriptionPlan::Enterprise => Self::Enterprise,
        }
    }
}

/// Database row mapping for the tenants table.
#[derive(Debug, Clone, FromRow)]
pub struct TenantEntity {
    pub id: Uuid,
    pub schema_name: String,
    pub name: String,
    pub description: String,
    pub business_name: String,
    pub business_type: String,
    pub contact_email: String,
    pub subscription_plan: SubscriptionPlanDb,
    pub subscription_expires: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub ai_tools_enabled: bool,
    pub custom_domain_enabled: bool,
    pub advanced_analytics_enabled: bool,
    pub max_pages: i32,
    pub max_storage_mb: i32,
    pub max_monthly_ai_requests: i32,
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<TenantEntity> for domain::models::Tenant {
    fn from(entity: TenantEntity) -> Self {
        Self {
            id: entity.id,
            schema_name: entity.schema_name,
            name: entity.name,
            description: entity.description,
            business_name: entity.business_name,
            business_type: entity.business_type,
            contact_email: entity.contact_email,
            subscription_plan: entity.subscription_plan.into(),
            subscription_expires: entity.subscription_expires,
            is_active: entity.is_active,
            ai_tools_enabled: entity.ai_tools_enabled,
            custom_domain_enabled: entity.custom_domain_enabled,
            advanced_analytics_enabled: entity.advanced_analytics_enabled,
            max_pages: entity.max_pages,
            max_storage_mb: entity.max_storage_mb,
            max_monthly_ai_requests: entity.max_monthly_ai_requests,
            primary_color: entity.primary_color,
            secondary_color: entity.secondary_color,
            logo_url: entity.logo_url,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_db_conversion() {
        assert_eq!(
            SubscriptionPlan::from(SubscriptionPlanDb::Starter),
            SubscriptionPlan::Starter
        );
        assert_eq!(
            SubscriptionPlanDb::from(SubscriptionPlan::Enterprise),
            SubscriptionPlanDb::Enterprise
        );
    }
}
