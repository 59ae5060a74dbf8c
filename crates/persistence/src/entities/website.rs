//! Website entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the per-tenant websites table.
#[derive(Debug, Clone, FromRow)]
pub struct WebsiteEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub subdomain: String,
    pub custom_domain: String,
    pub is_published: bool,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WebsiteEntity> for domain::models::Website {
    fn from(entity: WebsiteEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            subdomain: entity.subdomain,
            custom_domain: entity.custom_domain,
            is_published: entity.is_published,
            primary_color: entity.primary_color,
            secondary_color: entity.secondary_color,
            font_family: entity.font_family,
            meta_title: entity.meta_title,
            meta_description: entity.meta_description,
            meta_keywords: entity.meta_keywords,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
