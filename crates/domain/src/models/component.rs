//! Reusable page component models (tenant-scoped).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Kinds of reusable components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
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

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "header" => Ok(ComponentType::Header),
            "footer" => Ok(ComponentType::Footer),
            "navbar" => Ok(ComponentType::Navbar),
            "hero" => Ok(ComponentType::Hero),
            "features" => Ok(ComponentType::Features),
            "testimonials" => Ok(ComponentType::Testimonials),
            "contact_form" => Ok(ComponentType::ContactForm),
            "gallery" => Ok(ComponentType::Gallery),
            "text_block" => Ok(ComponentType::TextBlock),
            "custom" => Ok(ComponentType::Custom),
            _ => Err(format!("Unknown component type: {}", s)),
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ComponentType::Header => "header",
            ComponentType::Footer => "footer",
            ComponentType::Navbar => "navbar",
            ComponentType::Hero => "hero",
            ComponentType::Features => "features",
            ComponentType::Testimonials => "testimonials",
            ComponentType::ContactForm => "contact_form",
            ComponentType::Gallery => "gallery",
            ComponentType::TextBlock => "text_block",
            ComponentType::Custom => "custom",
        };
        write!(f, "{}", s)
    }
}

/// A reusable component belonging to a website.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Component {
    pub id: Uuid,
    pub website_id: Uuid,
    pub name: String,
    pub component_type: ComponentType,
    pub description: String,
    pub html_content: String,
    pub css_styles: String,
    pub javascript_code: String,
    /// Available across all pages of the website.
    pub is_global: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a component.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateComponentRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub component_type: ComponentType,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "HTML content is required"))]
    pub html_content: String,
    #[serde(default)]
    pub css_styles: String,
    #[serde(default)]
    pub javascript_code: String,
    #[serde(default)]
    pub is_global: bool,
}

/// Request to update a component. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "snake_case")]
pub struct UpdateComponentRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub component_type: Option<ComponentType>,
    pub description: Option<String>,
    pub html_content: Option<String>,
    pub css_styles: Option<String>,
    pub javascript_code: Option<String>,
    pub is_global: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_serde() {
        assert_eq!(
            serde_json::to_string(&ComponentType::ContactForm).unwrap(),
            "\"contact_form\""
        );
        let t: ComponentType = serde_json::from_str("\"text_block\"").unwrap();
        assert_eq!(t, ComponentType::TextBlock);
    }

    #[test]
    fn test_component_type_from_str() {
        assert_eq!(
            ComponentType::from_str("hero").unwrap(),
            ComponentType::Hero
        );
        assert!(ComponentType::from_str("sidebar").is_err());
    }

    #[test]
    fn test_create_request_requires_html() {
        let req = CreateComponentRequest {
            name: "Main header".to_string(),
            component_type: ComponentType::Header,
            description: String::new(),
            html_content: String::new(),
            css_styles: String::new(),
            javascript_code: String::new(),
            is_global: true,
        };
        assert!(req.validate().is_err());
    }
}
