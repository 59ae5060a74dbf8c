//! Platform user and per-tenant role models.
//!
//! Users live in the shared `public` schema and are not tenant-scoped; a
//! user's authority inside a tenant comes from their `UserTenantRole`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Platform-wide user account. Email is the login key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub email: String,
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

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A user's role within one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantRole {
    Owner,
    Admin,
    Editor,
    Viewer,
}

impl TenantRole {
    /// Whether this role may mutate tenant content.
    pub fn can_edit(&self) -> bool {
        matches!(self, TenantRole::Owner | TenantRole::Admin | TenantRole::Editor)
    }

    /// Whether this role may administer the tenant itself.
    pub fn can_manage(&self) -> bool {
        matches!(self, TenantRole::Owner | TenantRole::Admin)
    }
}

impl FromStr for TenantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(TenantRole::Owner),
            "admin" => Ok(TenantRole::Admin),
            "editor" => Ok(TenantRole::Editor),
            "viewer" => Ok(TenantRole::Viewer),
            _ => Err(format!("Unknown tenant role: {}", s)),
        }
    }
}

impl std::fmt::Display for TenantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantRole::Owner => write!(f, "owner"),
            TenantRole::Admin => write!(f, "admin"),
            TenantRole::Editor => write!(f, "editor"),
            TenantRole::Viewer => write!(f, "viewer"),
        }
    }
}

/// Membership of a user in a tenant. (user, tenant) pairs are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserTenantRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: TenantRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token pair returned after login, refresh or signup finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Refresh request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let user = User {
            id: Uuid::nil(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: String::new(),
            company: String::new(),
            job_title: String::new(),
            email_verified: false,
            newsletter_subscription: false,
            marketing_emails: true,
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        };
        assert_eq!(user.full_name(), "Jane Doe");
    }

    #[test]
    fn test_role_permissions() {
        assert!(TenantRole::Owner.can_edit());
        assert!(TenantRole::Owner.can_manage());
        assert!(TenantRole::Editor.can_edit());
        assert!(!TenantRole::Editor.can_manage());
        assert!(!TenantRole::Viewer.can_edit());
        assert!(!TenantRole::Viewer.can_manage());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(TenantRole::from_str("owner").unwrap(), TenantRole::Owner);
        assert_eq!(TenantRole::from_str("EDITOR").unwrap(), TenantRole::Editor);
        assert!(TenantRole::from_str("superuser").is_err());
    }

    #[test]
    fn test_role_serialization_roundtrip() {
        assert_eq!(serde_json::to_string(&TenantRole::Admin).unwrap(), "\"admin\"");
        let role: TenantRole = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(role, TenantRole::Viewer);
    }
}
