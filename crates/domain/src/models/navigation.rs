//! Navigation menu models (tenant-scoped).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One entry of a website's navigation tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NavigationItem {
    pub id: Uuid,
    pub website_id: Uuid,
    pub label: String,
    /// Internal page path or external URL.
    pub url: String,
    pub page_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub order: i32,
    pub is_active: bool,
    pub opens_in_new_tab: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to create a navigation item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateNavigationItemRequest {
    #[validate(length(min = 1, max = 50, message = "Label must be 1-50 characters"))]
    pub label: String,
    #[validate(length(min = 1, max = 200, message = "URL must be 1-200 characters"))]
    pub url: String,
    pub page_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub order: Option<i32>,
    #[serde(default)]
    pub opens_in_new_tab: bool,
}

/// Request to update a navigation item. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "snake_case")]
pub struct UpdateNavigationItemRequest {
    #[validate(length(min = 1, max = 50, message = "Label must be 1-50 characters"))]
    pub label: Option<String>,
    #[validate(length(min = 1, max = 200, message = "URL must be 1-200 characters"))]
    pub url: Option<String>,
    pub page_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    pub opens_in_new_tab: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateNavigationItemRequest {
            label: "Home".to_string(),
            url: "/".to_string(),
            page_id: None,
            parent_id: None,
            order: Some(0),
            opens_in_new_tab: false,
        };
        assert!(valid.validate().is_ok());

        let empty_label = CreateNavigationItemRequest {
            label: String::new(),
            ..valid
        };
        assert!(empty_label.validate().is_err());
    }
}
