//! Signup wizard state machine.
//!
//! The wizard advances strictly forward through its four steps. Accessing
//! or submitting a step ahead of the session's current position is an
//! `InvalidState` condition surfaced to the caller; it never silently
//! redirects. Resubmitting an already-completed step is allowed and
//! overwrites that step's fields (last write wins), without moving the
//! session backwards.

use thiserror::Error;

use crate::models::wizard::{WizardData, WizardStep};

/// Errors raised by wizard flow transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardFlowError {
    #[error("Step {requested} is not reachable yet; the wizard is at step {current}")]
    StepNotReachable { requested: u8, current: u8 },

    #[error("The signup wizard has already been completed")]
    AlreadyCompleted,

    #[error("Wizard data is missing required field: {0}")]
    MissingField(&'static str),
}

/// Checks that `requested` may be viewed or submitted while the session
/// sits at `current` (the step awaiting submission).
pub fn ensure_reachable(current: WizardStep, requested: WizardStep) -> Result<(), WizardFlowError> {
    if current == WizardStep::Completed {
        return Err(WizardFlowError::AlreadyCompleted);
    }
    if requested > current {
        return Err(WizardFlowError::StepNotReachable {
            requested: requested.number(),
            current: current.number(),
        });
    }
    Ok(())
}

/// The session position after a successful submission of `submitted`.
///
/// Submitting the current step advances; resubmitting an earlier step
/// leaves the position unchanged.
pub fn advance_after(current: WizardStep, submitted: WizardStep) -> WizardStep {
    if submitted == current {
        current.next()
    } else {
        current
    }
}

/// The fields finalization needs from steps 1-3.
///
/// Step 4's own fields arrive with the finalizing submission and are not
/// part of this profile.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub business_name: String,
    pub business_category: String,
    pub business_description: String,
    pub selected_domain: String,
    pub custom_domain: String,
}

/// Extracts the finalization profile, failing on any missing step field.
///
/// A session can only be missing fields here if its stored payload was
/// tampered with or truncated; the step guards make the normal flow
/// complete by construction.
pub fn finalize_profile(data: &WizardData) -> Result<SignupProfile, WizardFlowError> {
    fn required(
        field: &Option<String>,
        name: &'static str,
    ) -> Result<String, WizardFlowError> {
        field
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or(WizardFlowError::MissingField(name))
    }

    Ok(SignupProfile {
        first_name: required(&data.first_name, "first_name")?,
        last_name: required(&data.last_name, "last_name")?,
        email: required(&data.email, "email")?,
        password: required(&data.password, "password")?,
        business_name: required(&data.business_name, "business_name")?,
        business_category: required(&data.business_category, "business_category")?,
        business_description: data.business_description.clone().unwrap_or_default(),
        selected_domain: required(&data.selected_domain, "selected_domain")?,
        custom_domain: data.custom_domain.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wizard::{
        Step1PersonalRequest, Step2BusinessRequest, Step3DomainRequest,
    };

    #[test]
    fn test_step1_reachable_on_fresh_session() {
        assert!(ensure_reachable(WizardStep::Step1Personal, WizardStep::Step1Personal).is_ok());
    }

    #[test]
    fn test_forward_steps_unreachable() {
        let err =
            ensure_reachable(WizardStep::Step1Personal, WizardStep::Step3Domain).unwrap_err();
        assert_eq!(
            err,
            WizardFlowError::StepNotReachable {
                requested: 3,
                current: 1
            }
        );
    }

    #[test]
    fn test_earlier_steps_stay_reachable() {
        assert!(ensure_reachable(WizardStep::Step3Domain, WizardStep::Step1Personal).is_ok());
        assert!(ensure_reachable(WizardStep::Step3Domain, WizardStep::Step2Business).is_ok());
        assert!(ensure_reachable(WizardStep::Step3Domain, WizardStep::Step3Domain).is_ok());
    }

    #[test]
    fn test_completed_session_rejects_access() {
        assert_eq!(
            ensure_reachable(WizardStep::Completed, WizardStep::Step1Personal).unwrap_err(),
            WizardFlowError::AlreadyCompleted
        );
    }

    #[test]
    fn test_submitting_current_step_advances() {
        assert_eq!(
            advance_after(WizardStep::Step2Business, WizardStep::Step2Business),
            WizardStep::Step3Domain
        );
    }

    #[test]
    fn test_resubmitting_earlier_step_holds_position() {
        assert_eq!(
            advance_after(WizardStep::Step3Domain, WizardStep::Step1Personal),
            WizardStep::Step3Domain
        );
    }

    #[test]
    fn test_full_walk_reaches_completed() {
        let mut current = WizardStep::Step1Personal;
        for n in 1..=4 {
            let step = WizardStep::from_number(n).unwrap();
            ensure_reachable(current, step).unwrap();
            current = advance_after(current, step);
        }
        assert_eq!(current, WizardStep::Completed);
    }

    fn complete_data() -> WizardData {
        let mut data = WizardData::default();
        data.apply_step1(&Step1PersonalRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            password1: "hunter2hunter2".to_string(),
            password2: "hunter2hunter2".to_string(),
        });
        data.apply_step2(&Step2BusinessRequest {
            business_name: "Joe's Cafe".to_string(),
            business_category: "restaurant".to_string(),
            business_description: "Neighborhood cafe".to_string(),
            street_address: "1 Main Street".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "United States".to_string(),
            phone: String::new(),
        });
        data.apply_step3(&Step3DomainRequest {
            selected_domain: "joescafe.com".to_string(),
            custom_domain: String::new(),
        });
        data
    }

    #[test]
    fn test_finalize_profile_complete() {
        let profile = finalize_profile(&complete_data()).unwrap();
        assert_eq!(profile.email, "jane@example.com");
        assert_eq!(profile.business_name, "Joe's Cafe");
        assert_eq!(profile.selected_domain, "joescafe.com");
    }

    #[test]
    fn test_finalize_profile_missing_step3() {
        let mut data = complete_data();
        data.selected_domain = None;
        assert_eq!(
            finalize_profile(&data).unwrap_err(),
            WizardFlowError::MissingField("selected_domain")
        );
    }

    #[test]
    fn test_finalize_profile_empty_field_counts_as_missing() {
        let mut data = complete_data();
        data.email = Some(String::new());
        assert_eq!(
            finalize_profile(&data).unwrap_err(),
            WizardFlowError::MissingField("email")
        );
    }
}
