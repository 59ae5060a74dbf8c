//! User and tenant-role entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::TenantRole;

/// Database enum for tenant_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "tenant_role", rename_all = "lowercase")]
pub enum TenantRoleDb {
    Owner,
    Admin,
    Editor,
    Viewer,
}

impl From<TenantRoleDb> for TenantRole {
    fn from(db: TenantRoleDb) -> Self {
        match db {
            TenantRoleDb::Owner => Self::Owner,
            TenantRoleDb::Admin => Self::Admin,
            TenantRoleDb::Editor => Self::Editor,
            TenantRoleDb::Viewer => Self::Viewer,
        }
    }
}

impl From<TenantRole> for TenantRoleDb {
    fn from(role: TenantRole) -> Self {
        match role {
            TenantRole::Owner => Self::Owner,
            TenantRole::Admin => Self::Admin,
            TenantRole::Editor => Self::Editor,
            TenantRole::Viewer => Self::Viewer,
        }
    }
}

/// Database row mapping for the users table.
///
/// The password hash stays in the entity; the domain model deliberately
/// has no credential field.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub company: String,
    pub job_title: String,
    pub email_verified: bool,
    pub newsletter_subscription: bool,
    pub marketing_emails: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone: entity.phone,
            company: entity.company,
            job_title: entity.job_title,
            email_verified: entity.email_verified,
            newsletter_subscription: entity.newsletter_subscription,
            marketing_emails: entity.marketing_emails,
            is_active: entity.is_active,
            date_joined: entity.date_joined,
            last_login: entity.last_login,
        }
    }
}

/// Database row mapping for the user_tenant_roles table.
#[derive(Debug, Clone, FromRow)]
pub struct UserTenantRoleEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: TenantRoleDb,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserTenantRoleEntity> for domain::models::user::UserTenantRole {
    fn from(entity: UserTenantRoleEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            tenant_id: entity.tenant_id,
            role: entity.role.into(),
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_db_conversion() {
        assert_eq!(TenantRole::from(TenantRoleDb::Owner), TenantRole::Owner);
        assert_eq!(TenantRoleDb::from(TenantRole::Viewer), TenantRoleDb::Viewer);
    }
}
