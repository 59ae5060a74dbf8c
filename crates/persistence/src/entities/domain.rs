//! Tenant domain entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the tenant_domains table.
#[derive(Debug, Clone, FromRow)]
pub struct TenantDomainEntity {
    pub id: Uuid,
    pub hostname: String,
    pub tenant_id: Uuid,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TenantDomainEntity> for domain::models::TenantDomain {
    fn from(entity: TenantDomainEntity) -> Self {
        Self {
            id: entity.id,
            hostname: entity.hostname,
            tenant_id: entity.tenant_id,
            is_primary: entity.is_primary,
            created_at: entity.created_at,
        }
    }
}
