//! User tenant role repository for database operations.

use domain::models::user::UserTenantRole;
use domain::models::TenantRole;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::user::{TenantRoleDb, UserTenantRoleEntity};

const ROLE_COLUMNS: &str = "id, user_id, tenant_id, role, is_active, created_at";

/// Repository for per-tenant role assignments.
#[derive(Clone)]
pub struct UserTenantRoleRepository {
    pool: PgPool,
}

impl UserTenantRoleRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Assign a role, replacing any existing assignment for the
    /// (user, tenant) pair.
    pub async fn assign(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        role: TenantRole,
    ) -> Result<UserTenantRole, sqlx::Error> {
        let sql = format!(
            "INSERT INTO user_tenant_roles (user_id, tenant_id, role) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, tenant_id) \
             DO UPDATE SET role = EXCLUDED.role, is_active = true \
             RETURNING {}",
            ROLE_COLUMNS
        );
        let entity = sqlx::query_as::<_, UserTenantRoleEntity>(&sql)
            .bind(user_id)
            .bind(tenant_id)
            .bind(TenantRoleDb::from(role))
            .fetch_one(&self.pool)
            .await?;

        Ok(entity.into())
    }

    /// Find a user's role within a tenant.
    pub async fn find(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<UserTenantRole>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM user_tenant_roles WHERE user_id = $1 AND tenant_id = $2",
            ROLE_COLUMNS
        );
        let entity = sqlx::query_as::<_, UserTenantRoleEntity>(&sql)
            .bind(user_id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Into::into))
    }

    /// Whether the user holds any active role in the tenant.
    pub async fn has_active_role(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_tenant_roles \
             WHERE user_id = $1 AND tenant_id = $2 AND is_active = true)",
        )
        .bind(user_id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
    }

    /// All active memberships of a user.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserTenantRole>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM user_tenant_roles \
             WHERE user_id = $1 AND is_active = true ORDER BY created_at",
            ROLE_COLUMNS
        );
        let entities = sqlx::query_as::<_, UserTenantRoleEntity>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Deactivate a membership.
    pub async fn revoke(&self, user_id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_tenant_roles SET is_active = false \
             WHERE user_id = $1 AND tenant_id = $2 AND is_active = true",
        )
        .bind(user_id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
