//! Website domain models (tenant-scoped).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::slug::slugify;

/// A tenant's site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Website {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Unique platform-wide; derived from the name when not supplied.
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

/// Request to create a website.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateWebsiteRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Derived from the name when absent.
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub custom_domain: String,
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub primary_color: Option<String>,
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    #[validate(length(max = 60, message = "Meta title must be at most 60 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 160, message = "Meta description must be at most 160 characters"))]
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}

impl CreateWebsiteRequest {
    /// The subdomain to store: explicit value, or a slug of the name.
    pub fn effective_subdomain(&self) -> String {
        match &self.subdomain {
            Some(subdomain) if !subdomain.is_empty() => subdomain.clone(),
            _ => slugify(&self.name),
        }
    }
}

/// Request to update a website. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "snake_case")]
pub struct UpdateWebsiteRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub custom_domain: Option<String>,
    pub is_published: Option<bool>,
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub primary_color: Option<String>,
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    #[validate(length(max = 60, message = "Meta title must be at most 60 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 160, message = "Meta description must be at most 160 characters"))]
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(name: &str, subdomain: Option<&str>) -> CreateWebsiteRequest {
        CreateWebsiteRequest {
            name: name.to_string(),
            description: String::new(),
            subdomain: subdomain.map(|s| s.to_string()),
            custom_domain: String::new(),
            primary_color: None,
            secondary_color: None,
            font_family: None,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
        }
    }

    #[test]
    fn test_subdomain_derived_from_name() {
        assert_eq!(create_request("My Shop", None).effective_subdomain(), "my-shop");
    }

    #[test]
    fn test_explicit_subdomain_wins() {
        assert_eq!(
            create_request("My Shop", Some("shopfront")).effective_subdomain(),
            "shopfront"
        );
    }

    #[test]
    fn test_create_request_validation() {
        assert!(create_request("My Shop", Some("my-shop")).validate().is_ok());
        assert!(create_request("My Shop", Some("My Shop")).validate().is_err());
        assert!(create_request("", None).validate().is_err());
    }

    #[test]
    fn test_color_validation() {
        let mut req = create_request("My Shop", None);
        req.primary_color = Some("#112233".to_string());
        assert!(req.validate().is_ok());
        req.primary_color = Some("blue".to_string());
        assert!(req.validate().is_err());
    }
}
