//! Per-user tenant subscription models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::tenant::SubscriptionPlan;

/// Billing status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Expired,
    Suspended,
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(SubscriptionStatus::Active),
            "canceled" => Ok(SubscriptionStatus::Canceled),
            "expired" => Ok(SubscriptionStatus::Expired),
            "suspended" => Ok(SubscriptionStatus::Suspended),
            _ => Err(format!("Unknown subscription status: {}", s)),
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionStatus::Active => write!(f, "active"),
            SubscriptionStatus::Canceled => write!(f, "canceled"),
            SubscriptionStatus::Expired => write!(f, "expired"),
            SubscriptionStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// Billing state for a user within a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub next_billing_date: DateTime<Utc>,
    pub last_payment_date: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Active iff status is Active and expiry lies in the future.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn subscription(status: SubscriptionStatus, expires_at: DateTime<Utc>) -> Subscription {
        Subscription {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            tenant_id: Uuid::nil(),
            plan: SubscriptionPlan::Starter,
            status,
            started_at: Utc::now(),
            expires_at,
            next_billing_date: expires_at,
            last_payment_date: None,
        }
    }

    #[test]
    fn test_is_active() {
        let now = Utc::now();
        assert!(subscription(SubscriptionStatus::Active, now + Duration::days(1)).is_active(now));
    }

    #[test]
    fn test_inactive_when_expired() {
        let now = Utc::now();
        assert!(!subscription(SubscriptionStatus::Active, now - Duration::days(1)).is_active(now));
    }

    #[test]
    fn test_inactive_when_canceled() {
        let now = Utc::now();
        assert!(!subscription(SubscriptionStatus::Canceled, now + Duration::days(1)).is_active(now));
        assert!(!subscription(SubscriptionStatus::Suspended, now + Duration::days(1)).is_active(now));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            SubscriptionStatus::from_str("active").unwrap(),
            SubscriptionStatus::Active
        );
        assert!(SubscriptionStatus::from_str("paused").is_err());
    }
}
