//! Navigation item entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the per-tenant navigation_items table.
#[derive(Debug, Clone, FromRow)]
pub struct NavigationItemEntity {
    pub id: Uuid,
    pub website_id: Uuid,
    pub label: String,
    pub url: String,
    pub page_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub order: i32,
    pub is_active: bool,
    pub opens_in_new_tab: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NavigationItemEntity> for domain::models::navigation::NavigationItem {
    fn from(entity: NavigationItemEntity) -> Self {
        Self {
            id: entity.id,
            website_id: entity.website_id,
            label: entity.label,
            url: entity.url,
            page_id: entity.page_id,
            parent_id: entity.parent_id,
            order: entity.order,
            is_active: entity.is_active,
            opens_in_new_tab: entity.opens_in_new_tab,
            created_at: entity.created_at,
        }
    }
}
