//! Component entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::component::ComponentType;

/// Database enum for component_type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "component_type", rename_all = "snake_case")]
pub enum ComponentTypeDb {
    Header,
    Footer,
    Navbar,
    Hero,
    Features,
    Testimonials,
    ContactForm,
    Gallery,
    TextBlock,
    Custom,
}

impl From<ComponentTypeDb> for ComponentType {
    fn from(db: ComponentTypeDb) -> Self {
        match db {
            ComponentTypeDb::Header => Self::Header,
            ComponentTypeDb::Footer => Self::Footer,
            ComponentTypeDb::Navbar => Self::Navbar,
            ComponentTypeDb::Hero => Self::Hero,
            ComponentTypeDb::Features => Self::Features,
            ComponentTypeDb::Testimonials => Self::Testimonials,
            ComponentTypeDb::ContactForm => Self::ContactForm,
            ComponentTypeDb::Gallery => Self::Gallery,
            ComponentTypeDb::TextBlock => Self::TextBlock,
            ComponentTypeDb::Custom => Self::Custom,
        }
    }
}

impl From<ComponentType> for ComponentTypeDb {
    fn from(t: ComponentType) -> Self {
        match t {
            ComponentType::Header => Self::Header,
            ComponentType::Footer => Self::Footer,
            ComponentType::Navbar => Self::Navbar,
            ComponentType::Hero => Self::Hero,
            ComponentType::Features => Self::Features,
            ComponentType::Testimonials => Self::Testimonials,
            ComponentType::ContactForm => Self::ContactForm,
            ComponentType::Gallery => Self::Gallery,
            ComponentType::TextBlock => Self::TextBlock,
            ComponentType::Custom => Self::Custom,
        }
    }
}

/// Database row mapping for the per-tenant components table.
#[derive(Debug, Clone, FromRow)]
pub struct ComponentEntity {
    pub id: Uuid,
    pub website_id: Uuid,
    pub name: String,
    pub component_type: ComponentTypeDb,
    pub description: String,
    pub html_content: String,
    pub css_styles: String,
    pub javascript_code: String,
    pub is_global: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ComponentEntity> for domain::models::component::Component {
    fn from(entity: ComponentEntity) -> Self {
        Self {
            id: entity.id,
            website_id: entity.website_id,
            name: entity.name,
            component_type: entity.component_type.into(),
            description: entity.description,
            html_content: entity.html_content,
            css_styles: entity.css_styles,
            javascript_code: entity.javascript_code,
            is_global: entity.is_global,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
