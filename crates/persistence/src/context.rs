//! Explicit tenant context for data access.
//!
//! Every tenant-scoped repository method takes a `&TenantContext`. The
//! context is the only way a query selects a data partition; there is no
//! ambient "current tenant" state anywhere in the process, so concurrent
//! requests for different tenants cannot contaminate each other and tests
//! can construct contexts directly.

use thiserror::Error;
use uuid::Uuid;

use shared::validation::validate_schema_key;

/// Error constructing a tenant context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("Invalid schema key: {0}")]
    InvalidSchemaKey(String),
}

/// An immutable (tenant, schema) pair scoping data access.
///
/// The schema name is validated at construction and is the only value
/// ever interpolated into SQL text; everything else binds as a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: Uuid,
    schema_name: String,
}

impl TenantContext {
    /// Builds a context, rejecting schema keys that are not valid,
    /// non-reserved Postgres identifiers.
    pub fn new(tenant_id: Uuid, schema_name: impl Into<String>) -> Result<Self, ContextError> {
        let schema_name = schema_name.into();
        validate_schema_key(&schema_name)
            .map_err(|_| ContextError::InvalidSchemaKey(schema_name.clone()))?;
        Ok(Self {
            tenant_id,
            schema_name,
        })
    }

    /// The context for the shared platform partition.
    pub fn public() -> Self {
        Self {
            tenant_id: Uuid::nil(),
            schema_name: "public".to_string(),
        }
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    /// The validated schema qualifier for this tenant's tables.
    pub fn schema(&self) -> &str {
        &self.schema_name
    }

    /// Whether this context addresses the shared platform partition.
    pub fn is_public(&self) -> bool {
        self.schema_name == "public"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_context() {
        let ctx = TenantContext::new(Uuid::new_v4(), "my_shop_co").unwrap();
        assert_eq!(ctx.schema(), "my_shop_co");
        assert!(!ctx.is_public());
    }

    #[test]
    fn test_rejects_invalid_schema_keys() {
        let id = Uuid::new_v4();
        assert!(TenantContext::new(id, "My-Shop").is_err());
        assert!(TenantContext::new(id, "shop; drop table users").is_err());
        assert!(TenantContext::new(id, "").is_err());
        assert!(TenantContext::new(id, "pg_catalog").is_err());
    }

    #[test]
    fn test_public_context() {
        let ctx = TenantContext::public();
        assert!(ctx.is_public());
        assert_eq!(ctx.schema(), "public");
        assert_eq!(ctx.tenant_id(), Uuid::nil());
    }
}
