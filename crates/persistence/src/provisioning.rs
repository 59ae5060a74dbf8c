//! Tenant schema provisioning.
//!
//! Creating a tenant writes the directory rows (tenants, tenant_domains)
//! and creates the tenant's Postgres schema with its tables in a single
//! transaction; a conflict anywhere rolls everything back. Provisioning is
//! an administrative operation, not a request-time hot path, and does not
//! retry: the operator re-runs after fixing the input.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::entities::domain::TenantDomainEntity;
use crate::entities::tenant::{SubscriptionPlanDb, TenantEntity};
use domain::models::tenant::{SubscriptionPlan, Tenant};
use domain::models::TenantDomain;

/// Errors raised by tenant provisioning.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("Tenant with schema \"{0}\" already exists")]
    SchemaExists(String),

    #[error("Domain \"{0}\" already exists")]
    DomainExists(String),

    #[error("Invalid schema key: {0}")]
    InvalidSchemaKey(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Input to tenant provisioning, already normalized by the caller.
#[derive(Debug, Clone)]
pub struct ProvisionTenantParams {
    pub schema_name: String,
    pub name: String,
    pub description: String,
    pub business_name: String,
    pub contact_email: String,
    pub plan: SubscriptionPlan,
    pub subscription_expires: Option<DateTime<Utc>>,
    pub hostname: String,
}

const TENANT_RETURNING: &str = "id, schema_name, name, description, business_name, \
     business_type, contact_email, subscription_plan, subscription_expires, is_active, \
     ai_tools_enabled, custom_domain_enabled, advanced_analytics_enabled, max_pages, \
     max_storage_mb, max_monthly_ai_requests, primary_color, secondary_color, logo_url, \
     created_at";

/// Provision a tenant: directory rows, schema and tables, atomically.
pub async fn provision_tenant(
    pool: &PgPool,
    params: ProvisionTenantParams,
) -> Result<(Tenant, TenantDomain), ProvisioningError> {
    // Validates the schema key before it is ever interpolated into DDL.
    let ctx = TenantContext::new(Uuid::nil(), params.schema_name.clone())
        .map_err(|_| ProvisioningError::InvalidSchemaKey(params.schema_name.clone()))?;

    let schema_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tenants WHERE schema_name = $1)")
            .bind(&params.schema_name)
            .fetch_one(pool)
            .await?;
    if schema_taken {
        return Err(ProvisioningError::SchemaExists(params.schema_name));
    }

    let domain_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tenant_domains WHERE hostname = $1)")
            .bind(&params.hostname)
            .fetch_one(pool)
            .await?;
    if domain_taken {
        return Err(ProvisioningError::DomainExists(params.hostname));
    }

    let defaults = params.plan.defaults();

    let mut tx = pool.begin().await?;

    let tenant_sql = format!(
        "INSERT INTO tenants \
         (schema_name, name, description, business_name, contact_email, subscription_plan, \
          subscription_expires, ai_tools_enabled, custom_domain_enabled, \
          advanced_analytics_enabled, max_pages, max_storage_mb, max_monthly_ai_requests) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING {}",
        TENANT_RETURNING
    );
    let tenant_entity = sqlx::query_as::<_, TenantEntity>(&tenant_sql)
        .bind(&params.schema_name)
        .bind(&params.name)
        .bind(&params.description)
        .bind(&params.business_name)
        .bind(&params.contact_email)
        .bind(SubscriptionPlanDb::from(params.plan))
        .bind(params.subscription_expires)
        .bind(defaults.ai_tools_enabled)
        .bind(defaults.custom_domain_enabled)
        .bind(defaults.advanced_analytics_enabled)
        .bind(defaults.max_pages)
        .bind(defaults.max_storage_mb)
        .bind(defaults.max_monthly_ai_requests)
        .fetch_one(&mut *tx)
        .await?;

    let domain_entity = sqlx::query_as::<_, TenantDomainEntity>(
        "INSERT INTO tenant_domains (hostname, tenant_id, is_primary) \
         VALUES ($1, $2, true) \
         RETURNING id, hostname, tenant_id, is_primary, created_at",
    )
    .bind(&params.hostname)
    .bind(tenant_entity.id)
    .fetch_one(&mut *tx)
    .await?;

    for statement in tenant_schema_ddl(ctx.schema()) {
        sqlx::query(&statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    info!(
        schema = %params.schema_name,
        hostname = %domain_entity.hostname,
        plan = %params.plan,
        "Provisioned tenant"
    );

    Ok((tenant_entity.into(), domain_entity.into()))
}

/// Create the shared platform tenant and its routing record if missing.
///
/// Idempotent startup step; returns None when the public tenant already
/// exists.
pub async fn bootstrap_public_tenant(
    pool: &PgPool,
    base_domain: &str,
    platform_name: &str,
) -> Result<Option<Tenant>, ProvisioningError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tenants WHERE schema_name = 'public')")
            .fetch_one(pool)
            .await?;
    if exists {
        return Ok(None);
    }

    let mut tx = pool.begin().await?;

    let tenant_sql = format!(
        "INSERT INTO tenants \
         (schema_name, name, description, business_name, contact_email, subscription_plan, \
          ai_tools_enabled, custom_domain_enabled, advanced_analytics_enabled, \
          max_pages, max_storage_mb, max_monthly_ai_requests) \
         VALUES ('public', $1, 'Shared platform tenant for accounts and signup', $1, $2, \
                 'enterprise', true, true, true, 1000, 50000, 10000) \
         RETURNING {}",
        TENANT_RETURNING
    );
    let tenant_entity = sqlx::query_as::<_, TenantEntity>(&tenant_sql)
        .bind(platform_name)
        .bind(format!("admin@{}", base_domain))
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO tenant_domains (hostname, tenant_id, is_primary) VALUES ($1, $2, true)",
    )
    .bind(base_domain)
    .bind(tenant_entity.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(base_domain = %base_domain, "Bootstrapped public platform tenant");

    Ok(Some(tenant_entity.into()))
}

/// DDL creating a tenant's schema and tables.
///
/// Enum types live in the public schema and are shared by every tenant.
/// The schema identifier has been validated by `TenantContext`.
fn tenant_schema_ddl(schema: &str) -> Vec<String> {
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", schema),
        format!(
            r#"CREATE TABLE {schema}.websites (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(200) NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                subdomain VARCHAR(50) NOT NULL UNIQUE,
                custom_domain VARCHAR(100) NOT NULL DEFAULT '',
                is_published BOOLEAN NOT NULL DEFAULT false,
                primary_color VARCHAR(7) NOT NULL DEFAULT '#007bff',
                secondary_color VARCHAR(7) NOT NULL DEFAULT '#6c757d',
                font_family VARCHAR(100) NOT NULL DEFAULT 'Arial, sans-serif',
                meta_title VARCHAR(60) NOT NULL DEFAULT '',
                meta_description VARCHAR(160) NOT NULL DEFAULT '',
                meta_keywords VARCHAR(255) NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )"#
        ),
        format!(
            r#"CREATE TABLE {schema}.pages (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                website_id UUID NOT NULL REFERENCES {schema}.websites(id) ON DELETE CASCADE,
                title VARCHAR(200) NOT NULL,
                slug VARCHAR(200) NOT NULL,
                page_type public.page_type NOT NULL DEFAULT 'custom',
                content TEXT NOT NULL DEFAULT '',
                css_styles TEXT NOT NULL DEFAULT '',
                javascript_code TEXT NOT NULL DEFAULT '',
                meta_title VARCHAR(60) NOT NULL DEFAULT '',
                meta_description VARCHAR(160) NOT NULL DEFAULT '',
                is_published BOOLEAN NOT NULL DEFAULT false,
                is_homepage BOOLEAN NOT NULL DEFAULT false,
                requires_auth BOOLEAN NOT NULL DEFAULT false,
                "order" INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (website_id, slug)
            )"#
        ),
        format!(
            r#"CREATE TABLE {schema}.components (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                website_id UUID NOT NULL REFERENCES {schema}.websites(id) ON DELETE CASCADE,
                name VARCHAR(100) NOT NULL,
                component_type public.component_type NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                html_content TEXT NOT NULL,
                css_styles TEXT NOT NULL DEFAULT '',
                javascript_code TEXT NOT NULL DEFAULT '',
                is_global BOOLEAN NOT NULL DEFAULT false,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )"#
        ),
        format!(
            r#"CREATE TABLE {schema}.navigation_items (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                website_id UUID NOT NULL REFERENCES {schema}.websites(id) ON DELETE CASCADE,
                label VARCHAR(50) NOT NULL,
                url VARCHAR(200) NOT NULL,
                page_id UUID REFERENCES {schema}.pages(id) ON DELETE CASCADE,
                parent_id UUID REFERENCES {schema}.navigation_items(id) ON DELETE CASCADE,
                "order" INTEGER NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT true,
                opens_in_new_tab BOOLEAN NOT NULL DEFAULT false,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )"#
        ),
        format!(
            r#"CREATE TABLE {schema}.media_folders (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(100) NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                parent_id UUID REFERENCES {schema}.media_folders(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )"#
        ),
        format!(
            r#"CREATE TABLE {schema}.media_files (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(255) NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                file_type public.media_file_type NOT NULL,
                original_filename VARCHAR(255) NOT NULL,
                file_size BIGINT NOT NULL,
                mime_type VARCHAR(100) NOT NULL,
                folder_id UUID REFERENCES {schema}.media_folders(id) ON DELETE SET NULL,
                alt_text VARCHAR(255) NOT NULL DEFAULT '',
                width INTEGER,
                height INTEGER,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )"#
        ),
        format!(
            r#"CREATE TABLE {schema}.ai_tools (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name VARCHAR(100) NOT NULL,
                tool_type public.ai_tool_type NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT true,
                max_requests_per_hour INTEGER NOT NULL DEFAULT 100,
                max_requests_per_day INTEGER NOT NULL DEFAULT 1000,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )"#
        ),
        format!(
            r#"CREATE TABLE {schema}.ai_requests (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                tool_id UUID NOT NULL REFERENCES {schema}.ai_tools(id) ON DELETE CASCADE,
                prompt TEXT NOT NULL,
                parameters JSONB NOT NULL DEFAULT '{{}}',
                response_data JSONB NOT NULL DEFAULT '{{}}',
                output_text TEXT NOT NULL DEFAULT '',
                status public.ai_request_status NOT NULL DEFAULT 'pending',
                tokens_used INTEGER NOT NULL DEFAULT 0,
                error_message TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                completed_at TIMESTAMPTZ
            )"#
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_uses_given_schema() {
        let ddl = tenant_schema_ddl("my_shop_co");
        assert!(ddl[0].contains("CREATE SCHEMA IF NOT EXISTS my_shop_co"));
        assert!(ddl.iter().any(|s| s.contains("my_shop_co.websites")));
        assert!(ddl.iter().any(|s| s.contains("my_shop_co.pages")));
        assert!(ddl.iter().any(|s| s.contains("my_shop_co.ai_requests")));
    }

    #[test]
    fn test_ddl_references_shared_enum_types() {
        let ddl = tenant_schema_ddl("acme").join("\n");
        assert!(ddl.contains("public.page_type"));
        assert!(ddl.contains("public.component_type"));
        assert!(ddl.contains("public.media_file_type"));
        assert!(ddl.contains("public.ai_request_status"));
    }
}
