//! Signup wizard models.
//!
//! The wizard accumulates four steps of form input in a session-backed
//! record before any durable user or website row exists. Nothing here
//! touches storage; persistence of the session lives in the persistence
//! crate and finalization in the API layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// States of the signup wizard.
///
/// Transitions run strictly forward; a step only becomes reachable once
/// every earlier step has been submitted successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Step1Personal,
    Step2Business,
    Step3Domain,
    Step4Preview,
    Completed,
}

impl WizardStep {
    /// 1-based step number as it appears in URLs. `Completed` is 5.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Step1Personal => 1,
            WizardStep::Step2Business => 2,
            WizardStep::Step3Domain => 3,
            WizardStep::Step4Preview => 4,
            WizardStep::Completed => 5,
        }
    }

    /// Parses a URL step number (1-4).
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::Step1Personal),
            2 => Some(WizardStep::Step2Business),
            3 => Some(WizardStep::Step3Domain),
            4 => Some(WizardStep::Step4Preview),
            _ => None,
        }
    }

    /// The state entered after this step's form is accepted.
    pub fn next(&self) -> WizardStep {
        match self {
            WizardStep::Step1Personal => WizardStep::Step2Business,
            WizardStep::Step2Business => WizardStep::Step3Domain,
            WizardStep::Step3Domain => WizardStep::Step4Preview,
            WizardStep::Step4Preview => WizardStep::Completed,
            WizardStep::Completed => WizardStep::Completed,
        }
    }
}

/// Business categories offered in step 2.
pub const BUSINESS_CATEGORIES: &[&str] = &[
    "restaurant",
    "retail",
    "professional",
    "healthcare",
    "beauty",
    "fitness",
    "education",
    "technology",
    "consulting",
    "real_estate",
    "automotive",
    "construction",
    "finance",
    "legal",
    "marketing",
    "photography",
    "travel",
    "nonprofit",
    "event",
    "other",
];

/// Design styles offered in step 4.
pub const DESIGN_STYLES: &[&str] = &["modern", "professional", "creative", "minimal", "bold"];

/// Color schemes offered in step 4.
pub const COLOR_SCHEMES: &[&str] = &["blue", "green", "purple", "orange", "dark", "custom"];

fn validate_business_category(category: &str) -> Result<(), ValidationError> {
    if BUSINESS_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        let mut err = ValidationError::new("business_category");
        err.message = Some("Unknown business category".into());
        Err(err)
    }
}

fn validate_design_style(style: &str) -> Result<(), ValidationError> {
    if DESIGN_STYLES.contains(&style) {
        Ok(())
    } else {
        let mut err = ValidationError::new("design_style");
        err.message = Some("Unknown design style".into());
        Err(err)
    }
}

fn validate_color_scheme(scheme: &str) -> Result<(), ValidationError> {
    if COLOR_SCHEMES.contains(&scheme) {
        Ok(())
    } else {
        let mut err = ValidationError::new("color_scheme");
        err.message = Some("Unknown color scheme".into());
        Err(err)
    }
}

fn validate_approved(approved: &bool) -> Result<(), ValidationError> {
    if *approved {
        Ok(())
    } else {
        let mut err = ValidationError::new("approve_content");
        err.message = Some("Content must be approved to continue".into());
        Err(err)
    }
}

/// Step 1: personal information and credentials.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Step1PersonalRequest {
    #[validate(length(min = 1, max = 30, message = "First name must be 1-30 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "Last name must be 1-30 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password1: String,
    #[validate(must_match(other = "password1", message = "Passwords do not match"))]
    pub password2: String,
}

/// Step 2: business details and address.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_step2_address"))]
pub struct Step2BusinessRequest {
    #[validate(length(min = 1, max = 100, message = "Business name must be 1-100 characters"))]
    pub business_name: String,
    #[validate(custom(function = "validate_business_category"))]
    pub business_category: String,
    #[serde(default)]
    pub business_description: String,
    #[validate(length(min = 1, max = 200, message = "Street address is required"))]
    pub street_address: String,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, max = 20, message = "ZIP code is required"))]
    pub zip_code: String,
    #[validate(length(min = 1, max = 100, message = "Country is required"))]
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

// A complete address is more than a couple of characters in total.
fn validate_step2_address(req: &Step2BusinessRequest) -> Result<(), ValidationError> {
    let full_address = format!("{}, {}, {}", req.street_address, req.city, req.state);
    if full_address.trim().len() < 10 {
        let mut err = ValidationError::new("street_address");
        err.message = Some("Please provide a complete address".into());
        return Err(err);
    }
    Ok(())
}

/// Step 3: domain selection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Step3DomainRequest {
    #[validate(length(min = 1, max = 100, message = "A domain must be selected"))]
    pub selected_domain: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Custom domain must be at most 100 characters"))]
    pub custom_domain: String,
}

/// Step 4: preview confirmation and design choices.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Step4PreviewRequest {
    #[validate(custom(function = "validate_approved"))]
    pub approve_content: bool,
    #[validate(custom(function = "validate_design_style"))]
    pub design_style: String,
    #[validate(custom(function = "validate_color_scheme"))]
    pub color_scheme: String,
    #[serde(default)]
    pub additional_requests: String,
}

/// Accumulated wizard state, persisted as the session's JSON payload.
///
/// Every field is optional because steps fill it in incrementally; the
/// finalizer checks completeness before creating durable records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WizardData {
    // Step 1
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    // Step 2
    pub business_name: Option<String>,
    pub business_category: Option<String>,
    pub business_description: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    // Step 3
    pub selected_domain: Option<String>,
    pub custom_domain: Option<String>,
    // Step 4
    pub design_style: Option<String>,
    pub color_scheme: Option<String>,
    pub additional_requests: Option<String>,
}

impl WizardData {
    /// Merges step 1 fields. Last write wins on resubmission.
    pub fn apply_step1(&mut self, req: &Step1PersonalRequest) {
        self.first_name = Some(req.first_name.clone());
        self.last_name = Some(req.last_name.clone());
        self.email = Some(req.email.clone());
        self.password = Some(req.password1.clone());
    }

    /// Merges step 2 fields.
    pub fn apply_step2(&mut self, req: &Step2BusinessRequest) {
        self.business_name = Some(req.business_name.clone());
        self.business_category = Some(req.business_category.clone());
        self.business_description = Some(req.business_description.clone());
        self.street_address = Some(req.street_address.clone());
        self.city = Some(req.city.clone());
        self.state = Some(req.state.clone());
        self.zip_code = Some(req.zip_code.clone());
        self.country = Some(req.country.clone());
        self.phone = Some(req.phone.clone());
    }

    /// Merges step 3 fields.
    pub fn apply_step3(&mut self, req: &Step3DomainRequest) {
        self.selected_domain = Some(req.selected_domain.clone());
        self.custom_domain = Some(req.custom_domain.clone());
    }

    /// Merges step 4 fields.
    pub fn apply_step4(&mut self, req: &Step4PreviewRequest) {
        self.design_style = Some(req.design_style.clone());
        self.color_scheme = Some(req.color_scheme.clone());
        self.additional_requests = Some(req.additional_requests.clone());
    }
}

/// One domain-name candidate offered in step 3.
///
/// The candidate set is deterministic for a given (business name,
/// category); availability and price are advisory values from the
/// configured lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DomainSuggestion {
    pub domain: String,
    pub available: bool,
    pub price: String,
    pub recommended: bool,
}

/// Durable record produced by wizard finalization, consumed by the site
/// generation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PendingWebsite {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn step1() -> Step1PersonalRequest {
        Step1PersonalRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            password1: "hunter2hunter2".to_string(),
            password2: "hunter2hunter2".to_string(),
        }
    }

    fn step2() -> Step2BusinessRequest {
        Step2BusinessRequest {
            business_name: "Joe's Cafe".to_string(),
            business_category: "restaurant".to_string(),
            business_description: String::new(),
            street_address: "1 Main Street".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "United States".to_string(),
            phone: String::new(),
        }
    }

    #[test]
    fn test_step_numbers_roundtrip() {
        for n in 1..=4 {
            assert_eq!(WizardStep::from_number(n).unwrap().number(), n);
        }
        assert!(WizardStep::from_number(0).is_none());
        assert!(WizardStep::from_number(5).is_none());
    }

    #[test]
    fn test_step_ordering() {
        assert!(WizardStep::Step1Personal < WizardStep::Step2Business);
        assert!(WizardStep::Step4Preview < WizardStep::Completed);
    }

    #[test]
    fn test_next_chain_ends_at_completed() {
        let mut step = WizardStep::Step1Personal;
        for _ in 0..4 {
            step = step.next();
        }
        assert_eq!(step, WizardStep::Completed);
        assert_eq!(step.next(), WizardStep::Completed);
    }

    #[test]
    fn test_step1_password_mismatch() {
        let mut req = step1();
        req.password2 = "different_pass".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_step1_short_password() {
        let mut req = step1();
        req.password1 = "short".to_string();
        req.password2 = "short".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_step1_valid() {
        assert!(step1().validate().is_ok());
    }

    #[test]
    fn test_step2_rejects_unknown_category() {
        let mut req = step2();
        req.business_category = "space_travel".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_step2_rejects_incomplete_address() {
        let mut req = step2();
        req.street_address = "1".to_string();
        req.city = "A".to_string();
        req.state = "B".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_step4_requires_approval() {
        let req = Step4PreviewRequest {
            approve_content: false,
            design_style: "modern".to_string(),
            color_scheme: "blue".to_string(),
            additional_requests: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_step4_rejects_unknown_choices() {
        let req = Step4PreviewRequest {
            approve_content: true,
            design_style: "brutalist".to_string(),
            color_scheme: "blue".to_string(),
            additional_requests: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_wizard_data_accumulates() {
        let mut data = WizardData::default();
        data.apply_step1(&step1());
        data.apply_step2(&step2());

        assert_eq!(data.email.as_deref(), Some("jane@example.com"));
        assert_eq!(data.business_name.as_deref(), Some("Joe's Cafe"));
        assert!(data.selected_domain.is_none());
    }

    #[test]
    fn test_wizard_data_last_write_wins() {
        let mut data = WizardData::default();
        data.apply_step1(&step1());
        let mut resubmit = step1();
        resubmit.first_name = "Janet".to_string();
        data.apply_step1(&resubmit);
        assert_eq!(data.first_name.as_deref(), Some("Janet"));
    }

    #[test]
    fn test_wizard_data_serde_roundtrip() {
        let mut data = WizardData::default();
        data.apply_step1(&step1());
        let json = serde_json::to_string(&data).unwrap();
        let back: WizardData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
