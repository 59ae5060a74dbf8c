//! Page domain models (tenant-scoped).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use shared::slug::slugify;

/// Kinds of pages a website can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Home,
    About,
    Contact,
    Blog,
    Service,
    Product,
    Custom,
}

impl FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(PageType::Home),
            "about" => Ok(PageType::About),
            "contact" => Ok(PageType::Contact),
            "blog" => Ok(PageType::Blog),
            "service" => Ok(PageType::Service),
            "product" => Ok(PageType::Product),
            "custom" => Ok(PageType::Custom),
            _ => Err(format!("Unknown page type: {}", s)),
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageType::Home => write!(f, "home"),
            PageType::About => write!(f, "about"),
            PageType::Contact => write!(f, "contact"),
            PageType::Blog => write!(f, "blog"),
            PageType::Service => write!(f, "service"),
            PageType::Product => write!(f, "product"),
            PageType::Custom => write!(f, "custom"),
        }
    }
}

/// Content unit within a website. (website, slug) pairs are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Page {
    pub id: Uuid,
    pub website_id: Uuid,
    pub title: String,
    /// Derived from the title when not supplied.
    pub slug: String,
    pub page_type: PageType,
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

/// Request to create a page.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreatePageRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Derived from the title when absent.
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,
    pub page_type: Option<PageType>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub css_styles: String,
    #[serde(default)]
    pub javascript_code: String,
    #[validate(length(max = 60, message = "Meta title must be at most 60 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 160, message = "Meta description must be at most 160 characters"))]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_homepage: bool,
    #[serde(default)]
    pub requires_auth: bool,
    pub order: Option<i32>,
}

impl CreatePageRequest {
    /// The slug to store: explicit value, or a slug of the title.
    pub fn effective_slug(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => slugify(&self.title),
        }
    }
}

/// Request to update a page. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "snake_case")]
pub struct UpdatePageRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub page_type: Option<PageType>,
    pub content: Option<String>,
    pub css_styles: Option<String>,
    pub javascript_code: Option<String>,
    #[validate(length(max = 60, message = "Meta title must be at most 60 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 160, message = "Meta description must be at most 160 characters"))]
    pub meta_description: Option<String>,
    pub is_published: Option<bool>,
    pub is_homepage: Option<bool>,
    pub requires_auth: Option<bool>,
    pub order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(title: &str, slug: Option<&str>) -> CreatePageRequest {
        CreatePageRequest {
            title: title.to_string(),
            slug: slug.map(|s| s.to_string()),
            page_type: None,
            content: String::new(),
            css_styles: String::new(),
            javascript_code: String::new(),
            meta_title: None,
            meta_description: None,
            is_published: false,
            is_homepage: false,
            requires_auth: false,
            order: None,
        }
    }

    #[test]
    fn test_slug_derived_from_title() {
        assert_eq!(create_request("About Us", None).effective_slug(), "about-us");
    }

    #[test]
    fn test_explicit_slug_wins() {
        assert_eq!(
            create_request("About Us", Some("who-we-are")).effective_slug(),
            "who-we-are"
        );
    }

    #[test]
    fn test_page_type_roundtrip() {
        assert_eq!(serde_json::to_string(&PageType::Home).unwrap(), "\"home\"");
        let t: PageType = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(t, PageType::Custom);
        assert_eq!(PageType::from_str("blog").unwrap(), PageType::Blog);
        assert!(PageType::from_str("landing").is_err());
    }

    #[test]
    fn test_create_request_validation() {
        assert!(create_request("About Us", None).validate().is_ok());
        assert!(create_request("", None).validate().is_err());
        assert!(create_request("About", Some("Bad Slug")).validate().is_err());
    }
}
