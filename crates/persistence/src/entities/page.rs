//! Page entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::page::PageType;

/// Database enum for page_type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "page_type", rename_all = "lowercase")]
pub enum PageTypeDb {
    Home,
    About,
    Contact,
    Blog,
    Service,
    Product,
    Custom,
}

impl From<PageTypeDb> for PageType {
    fn from(db: PageTypeDb) -> Self {
        match db {
            PageTypeDb::Home => Self::Home,
            PageTypeDb::About => Self::About,
            PageTypeDb::Contact => Self::Contact,
            PageTypeDb::Blog => Self::Blog,
            PageTypeDb::Service => Self::Service,
            PageTypeDb::Product => Self::Product,
            PageTypeDb::Custom => Self::Custom,
        }
    }
}

impl From<PageType> for PageTypeDb {
    fn from(t: PageType) -> Self {
        match t {
            PageType::Home => Self::Home,
            PageType::About => Self::About,
            PageType::Contact => Self::Contact,
            PageType::Blog => Self::Blog,
            PageType::Service => Self::Service,
            PageType::Product => Self::Product,
            PageType::Custom => Self::Custom,
        }
    }
}

/// Database row mapping for the per-tenant pages table.
#[derive(Debug, Clone, FromRow)]
pub struct PageEntity {
    pub id: Uuid,
    pub website_id: Uuid,
    pub title: String,
    pub slug: String,
    pub page_type: PageTypeDb,
    pub content: String,
    pub css_styles: String,
    pub javascript_code: String,
    pub meta_title: String,
    pub meta_description: String,
    pub is_published: bool,
    pub is_homepage: bool,
    pub requires_auth: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PageEntity> for domain::models::Page {
    fn from(entity: PageEntity) -> Self {
        Self {
            id: entity.id,
            website_id: entity.website_id,
            title: entity.title,
            slug: entity.slug,
            page_type: entity.page_type.into(),
            content: entity.content,
            css_styles: entity.css_styles,
            javascript_code: entity.javascript_code,
            meta_title: entity.meta_title,
            meta_description: entity.meta_description,
            is_published: entity.is_published,
            is_homepage: entity.is_homepage,
            requires_auth: entity.requires_auth,
            order: entity.order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
