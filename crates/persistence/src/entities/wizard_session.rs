//! Wizard session and pending website entities (database row mappings).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the wizard_sessions table.
///
/// Sessions are keyed by a hashed opaque token; the accumulated step
/// fields live in the `data` JSONB column until finalization clears them.
#[derive(Debug, Clone, FromRow)]
pub struct WizardSessionEntity {
    pub id: Uuid,
    pub token_hash: String,
    pub data: JsonValue,
    pub current_step: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl WizardSessionEntity {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Database row mapping for the pending_website_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct PendingWebsiteEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    pub business_category: String,
    pub business_description: String,
    pub selected_domain: String,
    pub custom_domain: String,
    pub design_style: String,
    pub color_scheme: String,
    pub additional_requests: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<PendingWebsiteEntity> for domain::models::wizard::PendingWebsite {
    fn from(entity: PendingWebsiteEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            business_name: entity.business_name,
            business_category: entity.business_category,
            business_description: entity.business_description,
            selected_domain: entity.selected_domain,
            custom_domain: entity.custom_domain,
            design_style: entity.design_style,
            color_scheme: entity.color_scheme,
            additional_requests: entity.additional_requests,
            status: entity.status,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: DateTime<Utc>, completed_at: Option<DateTime<Utc>>) -> WizardSessionEntity {
        WizardSessionEntity {
            id: Uuid::nil(),
            token_hash: "x".repeat(64),
            data: serde_json::json!({}),
            current_step: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            expires_at,
            completed_at,
        }
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        assert!(session(now - Duration::minutes(1), None).is_expired(now));
        assert!(!session(now + Duration::minutes(1), None).is_expired(now));
    }

    #[test]
    fn test_completed() {
        let now = Utc::now();
        assert!(session(now, Some(now)).is_completed());
        assert!(!session(now, None).is_completed());
    }
}
