//! Platform bootstrap for initial setup.
//!
//! Runs after migrations on startup. Both steps are idempotent: the shared
//! public tenant is created once, and the admin account is reconciled with
//! the configured (email, password, force_reset) triple instead of being
//! scripted ad hoc.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{AdminBootstrapConfig, Config};
use domain::models::TenantRole;
use persistence::entities::user::TenantRoleDb;
use persistence::provisioning::bootstrap_public_tenant;
use persistence::repositories::{TenantRepository, UserRepository};
use shared::password::{hash_password, PasswordError};

/// Error types for platform bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),

    #[error("Provisioning error: {0}")]
    Provisioning(#[from] persistence::provisioning::ProvisioningError),
}

/// Ensure the public tenant and the configured admin account exist.
pub async fn bootstrap_platform(pool: &PgPool, config: &Config) -> Result<(), BootstrapError> {
    bootstrap_public_tenant(pool, &config.platform.base_domain, &config.platform.name).await?;
    ensure_admin_user(pool, &config.admin).await?;
    Ok(())
}

/// Idempotent admin account reconciliation.
///
/// - No account with the configured email: create it with an owner role on
///   the public tenant.
/// - Account exists and `force_reset` is set: replace its password hash.
/// - Account exists otherwise: leave it alone.
pub async fn ensure_admin_user(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<(), BootstrapError> {
    if config.email.is_empty() {
        return Ok(());
    }

    if config.password.is_empty() {
        warn!("SF__ADMIN__EMAIL is set but SF__ADMIN__PASSWORD is empty - skipping admin bootstrap");
        return Ok(());
    }

    let users = UserRepository::new(pool.clone());

    if let Some(user) = users.find_by_email(&config.email).await? {
        if config.force_reset {
            let password_hash = hash_password(&config.password)?;
            users.update_password_hash(user.id, &password_hash).await?;
            info!(email = %config.email, "Admin password reset by bootstrap");
        } else {
            info!(email = %config.email, "Admin account already exists - skipping bootstrap");
        }
        return Ok(());
    }

    let tenants = TenantRepository::new(pool.clone());
    let public_tenant_id = tenants
        .find_by_schema_name("public")
        .await?
        .map(|t| t.id)
        .ok_or(sqlx::Error::RowNotFound)?;

    let password_hash = hash_password(&config.password)?;

    // User and role are created atomically; a user without a role would
    // lock the operator out while the email check skips future boots.
    let mut tx = pool.begin().await?;

    let user_id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, first_name, last_name, email_verified) \
         VALUES ($1, $2, 'Platform', 'Administrator', true) \
         RETURNING id",
    )
    .bind(&config.email)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO user_tenant_roles (user_id, tenant_id, role) VALUES ($1, $2, $3)",
    )
    .bind(user_id)
    .bind(public_tenant_id)
    .bind(TenantRoleDb::from(TenantRole::Owner))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        email = %config.email,
        user_id = %user_id,
        "Bootstrap admin account created"
    );

    Ok(())
}
