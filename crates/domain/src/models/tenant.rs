//! Tenant domain models.
//!
//! A tenant is an isolated customer environment with its own Postgres
//! schema. The tenant directory lives in the shared `public` schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Subscription plans available for tenants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Starter,
    Professional,
    Enterprise,
}

/// Plan-tier defaults applied at provisioning time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanDefaults {
    pub max_pages: i32,
    pub max_storage_mb: i32,
    pub max_monthly_ai_requests: i32,
    pub ai_tools_enabled: bool,
    pub custom_domain_enabled: bool,
    pub advanced_analytics_enabled: bool,
}

impl SubscriptionPlan {
    /// Fixed lookup table of per-plan limits and feature flags.
    pub fn defaults(&self) -> PlanDefaults {
        match self {
            SubscriptionPlan::Starter => PlanDefaults {
                max_pages: 10,
                max_storage_mb: 1000,
                max_monthly_ai_requests: 100,
                ai_tools_enabled: false,
                custom_domain_enabled: false,
                advanced_analytics_enabled: false,
            },
            SubscriptionPlan::Professional => PlanDefaults {
                max_pages: 50,
                max_storage_mb: 5000,
                max_monthly_ai_requests: 500,
                ai_tools_enabled: true,
                custom_domain_enabled: true,
                advanced_analytics_enabled: false,
            },
            SubscriptionPlan::Enterprise => PlanDefaults {
                max_pages: 200,
                max_storage_mb: 20000,
                max_monthly_ai_requests: 2000,
                ai_tools_enabled: true,
                custom_domain_enabled: true,
                advanced_analytics_enabled: true,
            },
        }
    }
}

impl FromStr for SubscriptionPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "starter" => Ok(SubscriptionPlan::Starter),
            "professional" => Ok(SubscriptionPlan::Professional),
            "enterprise" => Ok(SubscriptionPlan::Enterprise),
            _ => Err(format!("Unknown subscription plan: {}", s)),
        }
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionPlan::Starter => write!(f, "starter"),
            SubscriptionPlan::Professional => write!(f, "professional"),
            SubscriptionPlan::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// Tenant domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Tenant {
    pub id: Uuid,
    /// Schema key selecting this tenant's data partition.
    pub schema_name: String,
    pub name: String,
    pub description: String,
    pub business_name: String,
    pub business_type: String,
    pub contact_email: String,
    pub subscription_plan: SubscriptionPlan,
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

impl Tenant {
    /// A subscription is active when the tenant is active and the expiry,
    /// if set, lies in the future.
    pub fn is_subscription_active(&self, now: DateTime<Utc>) -> bool {
        match self.subscription_expires {
            Some(expires) => self.is_active && expires > now,
            None => self.is_active,
        }
    }
}

/// Request to provision a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTenantRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    /// Subdomain token the schema key and hostname are derived from.
    #[validate(length(min = 2, max = 50, message = "Subdomain must be 2-50 characters"))]
    pub subdomain: String,
    #[validate(length(min = 2, max = 200, message = "Business name must be 2-200 characters"))]
    pub business_name: String,
    #[validate(email(message = "Invalid contact email format"))]
    pub contact_email: String,
    pub plan: Option<SubscriptionPlan>,
    /// Subscription duration in days (default 30).
    #[validate(range(min = 1, max = 3650, message = "Duration must be 1-3650 days"))]
    pub duration_days: Option<i64>,
}

/// Response for tenant provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateTenantResponse {
    #[serde(flatten)]
    pub tenant: Tenant,
    /// Primary hostname created for the tenant.
    pub hostname: String,
}

/// Query parameters for listing tenants.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListTenantsQuery {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
    pub is_active: Option<bool>,
    pub plan: Option<SubscriptionPlan>,
    pub search: Option<String>,
}

/// Generic usage metric with current, max and percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UsageMetric {
    pub current: i64,
    pub max: i32,
    pub percentage: f64,
}

impl UsageMetric {
    pub fn new(current: i64, max: i32) -> Self {
        let percentage = if max > 0 {
            (current as f64 / max as f64) * 100.0
        } else {
            0.0
        };
        Self {
            current,
            max,
            percentage,
        }
    }
}

/// Tenant usage statistics against plan limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TenantUsageResponse {
    pub tenant_id: Uuid,
    pub pages: UsageMetric,
    pub storage_mb: UsageMetric,
    pub ai_requests: UsageMetric,
    /// Usage period in YYYY-MM form.
    pub period: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_plan_serialization() {
        assert_eq!(
            serde_json::to_string(&SubscriptionPlan::Professional).unwrap(),
            "\"professional\""
        );
        let plan: SubscriptionPlan = serde_json::from_str("\"enterprise\"").unwrap();
        assert_eq!(plan, SubscriptionPlan::Enterprise);
    }

    #[test]
    fn test_plan_from_str() {
        assert_eq!(
            SubscriptionPlan::from_str("starter").unwrap(),
            SubscriptionPlan::Starter
        );
        assert_eq!(
            SubscriptionPlan::from_str("PROFESSIONAL").unwrap(),
            SubscriptionPlan::Professional
        );
        assert!(SubscriptionPlan::from_str("free").is_err());
    }

    #[test]
    fn test_plan_defaults_table() {
        let starter = SubscriptionPlan::Starter.defaults();
        assert_eq!(starter.max_pages, 10);
        assert_eq!(starter.max_storage_mb, 1000);
        assert_eq!(starter.max_monthly_ai_requests, 100);
        assert!(!starter.ai_tools_enabled);
        assert!(!starter.custom_domain_enabled);

        let professional = SubscriptionPlan::Professional.defaults();
        assert_eq!(professional.max_pages, 50);
        assert!(professional.ai_tools_enabled);
        assert!(professional.custom_domain_enabled);
        assert!(!professional.advanced_analytics_enabled);

        let enterprise = SubscriptionPlan::Enterprise.defaults();
        assert_eq!(enterprise.max_pages, 200);
        assert_eq!(enterprise.max_monthly_ai_requests, 2000);
        assert!(enterprise.advanced_analytics_enabled);
    }

    fn tenant_with_expiry(expires: Option<DateTime<Utc>>, is_active: bool) -> Tenant {
        Tenant {
            id: Uuid::nil(),
            schema_name: "acme".to_string(),
            name: "Acme".to_string(),
            description: String::new(),
            business_name: "Acme Corp".to_string(),
            business_type: String::new(),
            contact_email: "ops@acme.test".to_string(),
            subscription_plan: SubscriptionPlan::Starter,
            subscription_expires: expires,
            is_active,
            ai_tools_enabled: false,
            custom_domain_enabled: false,
            advanced_analytics_enabled: false,
            max_pages: 10,
            max_storage_mb: 1000,
            max_monthly_ai_requests: 100,
            primary_color: "#007bff".to_string(),
            secondary_color: "#6c757d".to_string(),
            logo_url: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_subscription_active_with_future_expiry() {
        let now = Utc::now();
        let tenant = tenant_with_expiry(Some(now + Duration::days(30)), true);
        assert!(tenant.is_subscription_active(now));
    }

    #[test]
    fn test_subscription_inactive_when_expired() {
        let now = Utc::now();
        let tenant = tenant_with_expiry(Some(now - Duration::days(1)), true);
        assert!(!tenant.is_subscription_active(now));
    }

    #[test]
    fn test_subscription_without_expiry_follows_active_flag() {
        let now = Utc::now();
        assert!(tenant_with_expiry(None, true).is_subscription_active(now));
        assert!(!tenant_with_expiry(None, false).is_subscription_active(now));
    }

    #[test]
    fn test_create_tenant_request_validation() {
        let valid = CreateTenantRequest {
            name: "Acme".to_string(),
            subdomain: "acme".to_string(),
            business_name: "Acme Corp".to_string(),
            contact_email: "ops@acme.test".to_string(),
            plan: Some(SubscriptionPlan::Professional),
            duration_days: Some(30),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateTenantRequest {
            contact_email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let bad_duration = CreateTenantRequest {
            duration_days: Some(0),
            ..valid
        };
        assert!(bad_duration.validate().is_err());
    }

    #[test]
    fn test_usage_metric_percentage() {
        let metric = UsageMetric::new(5, 10);
        assert_eq!(metric.percentage, 50.0);
        let unlimited = UsageMetric::new(5, 0);
        assert_eq!(unlimited.percentage, 0.0);
    }
}
