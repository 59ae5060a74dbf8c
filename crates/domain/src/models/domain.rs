//! Tenant domain (hostname) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A hostname routing to a tenant.
///
/// Hostnames are unique platform-wide; each tenant has at most one primary
/// domain, the canonical hostname when several map to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TenantDomain {
    pub id: Uuid,
    pub hostname: String,
    pub tenant_id: Uuid,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to attach an additional hostname to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateDomainRequest {
    #[validate(custom(function = "shared::validation::validate_hostname"))]
    pub hostname: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_domain_request_validation() {
        let valid = CreateDomainRequest {
            hostname: "shop.example.com".to_string(),
            is_primary: false,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateDomainRequest {
            hostname: "Not A Hostname".to_string(),
            is_primary: false,
        };
        assert!(invalid.validate().is_err());
    }
}
